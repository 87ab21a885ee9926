//! A module for direct-summation Newtonian N-body simulation.
//!
//! The two important structs in this module are:
//! - [Body], a point mass with a position, velocity and some display-only
//!   metadata ([BodyInfo]). Common kinds of bodies can be built from a
//!   [Preset].
//! - [Simulation], which owns an ordered list of bodies and advances them
//!   with semi-implicit (symplectic) Euler steps.
//!
//! Everything is in SI units: meters, seconds, kilograms.

mod body;
mod simulation;

// Newton's gravitational constant, in N m^2 / kg^2
pub const NEWTON_G: f64 = 6.674e-11;

// Added to the separation of every pair before squaring, in meters. Keeps
// coincident bodies from producing an infinite force.
pub const DEFAULT_SOFTENING: f64 = 1e-9;

pub use body::{Body, BodyInfo, Preset};
pub use simulation::{Simulation, SimulationConfig};
