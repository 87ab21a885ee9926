use std::f64::consts::PI;

// Mean Earth-Sun distance, close enough for testing
pub const EARTH_ORBIT_RADIUS: f64 = 1.496e11;

pub fn get_circular_velocity(radius: f64, mu: f64) -> f64 {
    (mu / radius).sqrt()
}

pub fn get_period(a: f64, mu: f64) -> f64 {
    (4.0 * PI * PI * a.powi(3) / mu).sqrt()
}
