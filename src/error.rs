use std::io;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Mass must be positive, got {0}")]
    NonPositiveMass(f64),
    #[error("Radius must be finite and non-negative, got {0}")]
    InvalidRadius(f64),
    #[error("Body '{name}' has a non-finite {field}")]
    NonFinite { name: String, field: &'static str },
    #[error("Gravitational constant must be finite and positive, got {0}")]
    InvalidGravitationalConstant(f64),
    #[error("Softening must be finite and positive, got {0}")]
    InvalidSoftening(f64),
    #[error("Can't read scenario file: {0}")]
    Io(#[from] io::Error),
    #[error("Scenario line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
