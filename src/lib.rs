pub mod error;
pub mod file;
pub mod math;
pub mod nbody;

pub use error::{Error, Result};

#[cfg(test)]
pub mod consts;
