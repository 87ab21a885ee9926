use nalgebra::{Point3, Vector3};

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::math::vector::magnitude;

// All the info about a body that the physics never looks at
#[derive(Debug, Clone, PartialEq)]
pub struct BodyInfo {
    pub name: String,
    pub radius: f64,
    pub color: Point3<f32>,
}

/// A point mass moving under gravity.
///
/// The mass is checked when the body is built and can't be changed afterwards,
/// so dividing by it is always safe.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    info: BodyInfo,
    mass: f64,
    position: Vector3<f64>,
    velocity: Vector3<f64>,
}

impl Body {
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn new(
        info: BodyInfo,
        mass: f64,
        position: Vector3<f64>,
        velocity: Vector3<f64>,
    ) -> Result<Self> {
        // Written this way so that NaN is rejected too
        if !(mass > 0.0) {
            return Err(Error::NonPositiveMass(mass));
        }
        if !(info.radius >= 0.0) || info.radius.is_infinite() {
            return Err(Error::InvalidRadius(info.radius));
        }

        let non_finite = |field| Error::NonFinite {
            name: info.name.clone(),
            field,
        };
        if mass.is_infinite() {
            return Err(non_finite("mass"));
        }
        if !position.iter().all(|x| x.is_finite()) {
            return Err(non_finite("position"));
        }
        if !velocity.iter().all(|x| x.is_finite()) {
            return Err(non_finite("velocity"));
        }

        Ok(Body {
            info,
            mass,
            position,
            velocity,
        })
    }

    pub fn info(&self) -> &BodyInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn radius(&self) -> f64 {
        self.info.radius
    }

    pub fn color(&self) -> Point3<f32> {
        self.info.color
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn position(&self) -> Vector3<f64> {
        self.position
    }

    pub fn velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    /// Kicks the velocity by the acceleration this force produces over `dt`.
    /// Position is left alone; see [Body::integrate_position].
    pub fn apply_force(&mut self, force: &Vector3<f64>, dt: f64) {
        let acceleration = force / self.mass;
        self.velocity += acceleration * dt;
    }

    /// Drifts the position along the current velocity for `dt`.
    pub fn integrate_position(&mut self, dt: f64) {
        self.position += self.velocity * dt;
    }

    pub fn momentum(&self) -> Vector3<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        magnitude(&(other.position - self.position))
    }
}

/// Stock kinds of body. They only differ in their default mass, radius and
/// color; once built, a body doesn't remember which preset it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Star,
    Planet,
    CompactObject,
}

impl Preset {
    pub fn default_mass(self) -> f64 {
        match self {
            Preset::Star => 2e30,
            Preset::Planet => 6e24,
            Preset::CompactObject => 5e30,
        }
    }

    pub fn default_radius(self) -> f64 {
        match self {
            Preset::Star => 7e8,
            Preset::Planet => 6e6,
            Preset::CompactObject => 1e7,
        }
    }

    pub fn color(self) -> Point3<f32> {
        match self {
            // yellow
            Preset::Star => Point3::new(1.0, 1.0, 0.0),
            // light blue, #add8e6
            Preset::Planet => Point3::new(173.0 / 255.0, 216.0 / 255.0, 230.0 / 255.0),
            // purple, #800080
            Preset::CompactObject => Point3::new(128.0 / 255.0, 0.0, 128.0 / 255.0),
        }
    }

    pub fn info(self, name: &str) -> BodyInfo {
        BodyInfo {
            name: name.to_owned(),
            radius: self.default_radius(),
            color: self.color(),
        }
    }

    pub fn body(self, name: &str, position: Vector3<f64>, velocity: Vector3<f64>) -> Result<Body> {
        self.body_with_mass(name, self.default_mass(), position, velocity)
    }

    pub fn body_with_mass(
        self,
        name: &str,
        mass: f64,
        position: Vector3<f64>,
        velocity: Vector3<f64>,
    ) -> Result<Body> {
        Body::new(self.info(name), mass, position, velocity)
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "star" | "sun" => Ok(Preset::Star),
            "planet" => Ok(Preset::Planet),
            "compact" | "compact-object" | "black-hole" => Ok(Preset::CompactObject),
            other => Err(format!("unknown body kind '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_info() -> BodyInfo {
        BodyInfo {
            name: "Rock".to_owned(),
            radius: 1.0,
            color: Point3::new(0.5, 0.5, 0.5),
        }
    }

    #[test]
    fn test_rejects_bad_mass() {
        for &mass in &[0.0, -1.0, -0.0, f64::NAN] {
            let result = Body::new(test_info(), mass, Vector3::zeros(), Vector3::zeros());
            assert!(
                matches!(result, Err(Error::NonPositiveMass(_))),
                "mass {} was accepted",
                mass
            );
        }

        let result = Body::new(test_info(), f64::INFINITY, Vector3::zeros(), Vector3::zeros());
        assert!(matches!(result, Err(Error::NonFinite { field: "mass", .. })));
    }

    #[test]
    fn test_rejects_bad_radius() {
        for &radius in &[-1.0, f64::NAN, f64::INFINITY] {
            let info = BodyInfo {
                radius,
                ..test_info()
            };
            let result = Body::new(info, 1.0, Vector3::zeros(), Vector3::zeros());
            assert!(matches!(result, Err(Error::InvalidRadius(_))));
        }

        // A zero radius is fine, it's just a point
        let info = BodyInfo {
            radius: 0.0,
            ..test_info()
        };
        assert!(Body::new(info, 1.0, Vector3::zeros(), Vector3::zeros()).is_ok());
    }

    #[test]
    fn test_rejects_non_finite_state() {
        let bad = Vector3::new(0.0, f64::NAN, 0.0);
        let result = Body::new(test_info(), 1.0, bad, Vector3::zeros());
        assert!(matches!(
            result,
            Err(Error::NonFinite {
                field: "position",
                ..
            })
        ));

        let bad = Vector3::new(0.0, 0.0, f64::NEG_INFINITY);
        let result = Body::new(test_info(), 1.0, Vector3::zeros(), bad);
        match result {
            Err(Error::NonFinite { name, field }) => {
                assert_eq!(name, "Rock");
                assert_eq!(field, "velocity");
            }
            other => panic!("Expected a non-finite velocity error, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_force() {
        let mut body = Body::new(
            test_info(),
            2.0,
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(0.0, 1.0, 0.0),
        )
        .unwrap();

        // a = F / m = (2, 0, -1), dv = a dt
        body.apply_force(&Vector3::new(4.0, 0.0, -2.0), 0.5);
        approx::assert_relative_eq!(body.velocity(), Vector3::new(1.0, 1.0, -0.5));

        // Kicks don't move the body
        assert_eq!(body.position(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_integrate_position() {
        let mut body = Body::new(
            test_info(),
            2.0,
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(-2.0, 1.0, 0.5),
        )
        .unwrap();

        body.integrate_position(2.0);
        approx::assert_relative_eq!(body.position(), Vector3::new(-3.0, 4.0, 4.0));
        assert_eq!(body.velocity(), Vector3::new(-2.0, 1.0, 0.5));
    }

    #[test]
    fn test_diagnostics() {
        let a = Body::new(
            test_info(),
            3.0,
            Vector3::zeros(),
            Vector3::new(1.0, 2.0, 2.0),
        )
        .unwrap();
        let b = Body::new(
            test_info(),
            1.0,
            Vector3::new(3.0, 4.0, 0.0),
            Vector3::zeros(),
        )
        .unwrap();

        approx::assert_relative_eq!(a.momentum(), Vector3::new(3.0, 6.0, 6.0));
        approx::assert_relative_eq!(a.kinetic_energy(), 13.5);
        approx::assert_relative_eq!(a.distance_to(&b), 5.0);
        approx::assert_relative_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn test_presets() {
        let sun = Preset::Star
            .body("Sun", Vector3::zeros(), Vector3::zeros())
            .unwrap();
        assert_eq!(sun.name(), "Sun");
        assert_eq!(sun.mass(), 2e30);
        assert_eq!(sun.radius(), 7e8);
        assert_eq!(sun.color(), Point3::new(1.0, 1.0, 0.0));

        let earth = Preset::Planet
            .body("Earth", Vector3::x() * 1.5e11, Vector3::y() * 3e4)
            .unwrap();
        assert_eq!(earth.mass(), 6e24);
        assert_eq!(earth.radius(), 6e6);

        let hole = Preset::CompactObject
            .body_with_mass("Hole", 1e31, Vector3::zeros(), Vector3::zeros())
            .unwrap();
        assert_eq!(hole.mass(), 1e31);
        assert_eq!(hole.radius(), 1e7);

        // Overridden masses are still validated
        assert!(Preset::Planet
            .body_with_mass("Nope", -6e24, Vector3::zeros(), Vector3::zeros())
            .is_err());
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("star".parse::<Preset>(), Ok(Preset::Star));
        assert_eq!("Planet".parse::<Preset>(), Ok(Preset::Planet));
        assert_eq!("black-hole".parse::<Preset>(), Ok(Preset::CompactObject));
        assert!("comet".parse::<Preset>().is_err());
    }
}
