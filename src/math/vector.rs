use nalgebra::Vector3;

// Addition, subtraction and scaling are just nalgebra's operators; these cover
// the few operations where we want a specific degenerate-input policy.

/// Euclidean length. Components are scaled by the largest one before
/// squaring, so tiny and huge (but finite) vectors don't underflow to zero or
/// overflow to infinity.
#[allow(clippy::float_cmp)]
pub fn magnitude(v: &Vector3<f64>) -> f64 {
    let scale = v.amax();
    if scale == 0.0 || !scale.is_finite() {
        return scale;
    }
    scale * (v / scale).norm()
}

/// Returns the unit vector pointing along `v`, or the zero vector if `v` has
/// zero length.
#[allow(clippy::float_cmp)]
pub fn normalize_or_zero(v: &Vector3<f64>) -> Vector3<f64> {
    let m = magnitude(v);
    if m == 0.0 {
        Vector3::zeros()
    } else {
        v / m
    }
}

/// Scales `v` down so that its length is at most `max_magnitude`. Vectors that
/// are already short enough are returned untouched, so the result is bitwise
/// equal to the input in that case.
pub fn clamp_magnitude(v: &Vector3<f64>, max_magnitude: f64) -> Vector3<f64> {
    let m = magnitude(v);
    if m > max_magnitude {
        v * (max_magnitude / m)
    } else {
        *v
    }
}
