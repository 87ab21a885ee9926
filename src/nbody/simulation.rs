use log::{debug, trace};
use nalgebra::Vector3;

use super::body::Body;
use super::{DEFAULT_SOFTENING, NEWTON_G};
use crate::error::{Error, Result};
use crate::math::vector::{magnitude, normalize_or_zero};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub gravitational_constant: f64,
    pub softening: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            gravitational_constant: NEWTON_G,
            softening: DEFAULT_SOFTENING,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        let g = self.gravitational_constant;
        if !(g.is_finite() && g > 0.0) {
            return Err(Error::InvalidGravitationalConstant(g));
        }
        // A zero softening would turn coincident bodies into NaNs
        let eps = self.softening;
        if !(eps.is_finite() && eps > 0.0) {
            return Err(Error::InvalidSoftening(eps));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Simulation {
    // Invariants:
    //   - `bodies` and `initial_bodies` are always the same length
    //   - the order of `bodies` only changes by appending, between steps
    bodies: Vec<Body>,
    initial_bodies: Vec<Body>,
    config: SimulationConfig,
    time: f64,
    steps: usize,
}

impl Simulation {
    pub fn new() -> Self {
        Self::with_valid_config(SimulationConfig::default())
    }

    pub fn with_config(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: SimulationConfig) -> Self {
        Simulation {
            bodies: vec![],
            initial_bodies: vec![],
            config,
            time: 0.0,
            steps: 0,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Appends a body, returning its index. The index is stable for the life
    /// of the simulation.
    pub fn add_body(&mut self, body: Body) -> usize {
        debug!(
            "Adding body {} '{}' (mass {:e} kg) at {:?}",
            self.bodies.len(),
            body.name(),
            body.mass(),
            body.position()
        );
        self.initial_bodies.push(body.clone());
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn get_body(&self, idx: usize) -> Option<&Body> {
        self.bodies.get(idx)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Simulated seconds since the start (or the last reset)
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Puts every body back where it was when it was added, and rewinds the
    /// clock to zero.
    pub fn reset(&mut self) {
        debug!(
            "Resetting {} bodies after {} steps",
            self.bodies.len(),
            self.steps
        );
        self.bodies.clone_from(&self.initial_bodies);
        self.time = 0.0;
        self.steps = 0;
    }

    /// Force that `b` exerts on `a`. The force on `b` is the negation of this.
    fn pairwise_force(&self, a: &Body, b: &Body) -> Vector3<f64> {
        let r = b.position() - a.position();
        // No direction to pull in. Bail before the force magnitude, which can
        // overflow for huge masses and would turn 0 * inf into NaN.
        if r == Vector3::zeros() {
            return Vector3::zeros();
        }
        // Softening goes on the distance, not the distance squared
        let dist = magnitude(&r) + self.config.softening;
        let f_mag = self.config.gravitational_constant * a.mass() * b.mass() / (dist * dist);
        normalize_or_zero(&r) * f_mag
    }

    /// Computes the net gravitational force on every body, from the positions
    /// as they are right now. The result is indexed the same way as
    /// [Simulation::bodies].
    pub fn compute_forces(&self) -> Vec<Vector3<f64>> {
        let n = self.bodies.len();
        let mut forces = vec![Vector3::zeros(); n];

        // Each unordered pair once; Newton's third law gives us the other half
        for i in 0..n {
            for j in (i + 1)..n {
                let f = self.pairwise_force(&self.bodies[i], &self.bodies[j]);
                forces[i] += f;
                forces[j] -= f;
            }
        }

        forces
    }

    /// Advances every body by `dt` seconds with a semi-implicit Euler step.
    pub fn update(&mut self, dt: f64) {
        let forces = self.compute_forces();

        // All the kicks have to land before any body drifts, otherwise the
        // result would depend on the order of `bodies`.
        for (body, force) in self.bodies.iter_mut().zip(forces.iter()) {
            body.apply_force(force, dt);
        }
        for body in self.bodies.iter_mut() {
            body.integrate_position(dt);
        }

        self.time += dt;
        self.steps += 1;
        trace!("Step {} done, t = {} s", self.steps, self.time);
    }

    pub fn run(&mut self, dt: f64, num_steps: usize) {
        for _ in 0..num_steps {
            self.update(dt);
        }
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass()).sum()
    }

    pub fn total_momentum(&self) -> Vector3<f64> {
        self.bodies
            .iter()
            .fold(Vector3::zeros(), |acc, b| acc + b.momentum())
    }

    /// Mass-weighted mean position, or `None` if there are no bodies.
    pub fn center_of_mass(&self) -> Option<Vector3<f64>> {
        if self.bodies.is_empty() {
            return None;
        }
        let weighted = self
            .bodies
            .iter()
            .fold(Vector3::zeros(), |acc, b| acc + b.position() * b.mass());
        Some(weighted / self.total_mass())
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }

    /// Gravitational potential energy, softened the same way as the forces.
    pub fn potential_energy(&self) -> f64 {
        let g = self.config.gravitational_constant;
        let mut energy = 0.0;
        for (i, a) in self.bodies.iter().enumerate() {
            for b in &self.bodies[i + 1..] {
                energy -= g * a.mass() * b.mass() / (a.distance_to(b) + self.config.softening);
            }
        }
        energy
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}
