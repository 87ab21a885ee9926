use nalgebra::{Point3, Vector3};

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::nbody::{Body, BodyInfo, Preset};

/// The scenario the simulator runs when it isn't given a file: a Sun at the
/// origin and an Earth-like planet 1.5e11 m away, moving at 30 km/s.
pub const DEFAULT_SCENARIO: &str = include_str!("../scenarios/sun-earth.txt");

pub fn read_file(filename: impl AsRef<Path>) -> Result<Vec<Body>> {
    parse_scenario(&fs::read_to_string(filename)?)
}

/// Parses a table of bodies, one per line, in the order they should be added
/// to a simulation. The first line is a header and is skipped. Columns are:
///
/// `name kind mass radius color x y z vx vy vz`
///
/// `kind` is `star`, `planet`, `compact`, or `custom`. Mass, radius and color
/// can be `-` to use the preset's value; `custom` bodies have no preset and so
/// must give all three. Colors are 6-digit hex. Everything after a `#` is a
/// comment.
pub fn parse_scenario(contents: &str) -> Result<Vec<Body>> {
    let mut bodies = vec![];

    // Read lines, skipping header
    for (idx, line) in contents.lines().enumerate().skip(1) {
        let line = match line.find('#') {
            Some(comment_start) => &line[..comment_start],
            None => line,
        };
        if line.trim().is_empty() {
            continue;
        }
        bodies.push(parse_line(idx + 1, line)?);
    }

    Ok(bodies)
}

fn parse_line(line_no: usize, line: &str) -> Result<Body> {
    let parse_err = |message: String| Error::Parse {
        line: line_no,
        message,
    };
    let mut fields = line.split_ascii_whitespace();

    macro_rules! next_string {
        ($what:expr) => {
            fields
                .next()
                .ok_or_else(|| parse_err(format!("missing {}", $what)))?
        };
    }

    // `-` means "use the default", which we represent as None
    macro_rules! next_optional {
        ($what:expr, $parse:expr) => {
            match next_string!($what) {
                "-" => None,
                s => Some($parse(s).map_err(|e| parse_err(format!("bad {} '{}': {}", $what, s, e)))?),
            }
        };
    }

    macro_rules! next_f64 {
        ($what:expr) => {{
            let s = next_string!($what);
            s.parse::<f64>()
                .map_err(|e| parse_err(format!("bad {} '{}': {}", $what, s, e)))?
        }};
    }

    let name = next_string!("name");
    let preset = match next_string!("kind") {
        "custom" => None,
        kind => Some(kind.parse::<Preset>().map_err(&parse_err)?),
    };

    let mass = next_optional!("mass", str::parse::<f64>);
    let radius = next_optional!("radius", str::parse::<f64>);
    let color = next_optional!("color", parse_color);

    let position = Vector3::new(next_f64!("x"), next_f64!("y"), next_f64!("z"));
    let velocity = Vector3::new(next_f64!("vx"), next_f64!("vy"), next_f64!("vz"));

    if let Some(extra) = fields.next() {
        return Err(parse_err(format!("unexpected trailing field '{}'", extra)));
    }

    // Fill in whatever was left out from the preset
    let missing = |what: &str| parse_err(format!("custom body '{}' needs a {}", name, what));
    let mass = mass
        .or_else(|| preset.map(Preset::default_mass))
        .ok_or_else(|| missing("mass"))?;
    let radius = radius
        .or_else(|| preset.map(Preset::default_radius))
        .ok_or_else(|| missing("radius"))?;
    let color = color
        .or_else(|| preset.map(Preset::color))
        .ok_or_else(|| missing("color"))?;

    let info = BodyInfo {
        name: name.to_owned(),
        radius,
        color,
    };
    Body::new(info, mass, position, velocity).map_err(|e| parse_err(e.to_string()))
}

fn parse_color(s: &str) -> std::result::Result<Point3<f32>, String> {
    if s.len() != 6 || !s.is_ascii() {
        return Err("expected 6 hex digits".to_owned());
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&s[range], 16)
            .map(|c| c as f32 / 255.0)
            .map_err(|e| e.to_string())
    };

    Ok(Point3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
