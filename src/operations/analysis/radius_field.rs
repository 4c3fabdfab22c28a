use crate::geometry::DenseRing;

/// Converts a signed curvature into an unclamped rounding radius.
///
/// Positive curvature is capped at `1 / min_radius` and floored at
/// `1 / max_radius` before inversion, so the result always lies in
/// `[min_radius, max_radius]`. Flat and concave samples impose no rounding
/// constraint and get `max_radius`.
#[must_use]
pub fn radius_from_curvature(curvature: f64, min_radius: f64, max_radius: f64) -> f64 {
    if curvature > 0.0 {
        let bounded = curvature.min(1.0 / min_radius).max(1.0 / max_radius);
        (1.0 / bounded).max(min_radius).min(max_radius)
    } else {
        max_radius
    }
}

/// Fills `radius` for every sample of the ring.
pub fn assign(ring: &mut DenseRing, min_radius: f64, max_radius: f64) {
    for sample in &mut ring.samples {
        sample.radius = radius_from_curvature(sample.curvature, min_radius, max_radius);
    }
}
