use tracing::debug;

use crate::geometry::DenseRing;
use crate::math::polygon_2d::left_normal;
use crate::math::{Vector2, TOLERANCE};

/// Re-derives tangent, outward normal and signed curvature for every sample
/// from central differences over the ring.
///
/// The tangent at `i` is the direction from `i - 1` to `i + 1`. Curvature is
/// the magnitude of `(t[i+1] - t[i-1]) / |p[i+1] - p[i-1]|`, negative when
/// that vector leans along the outward normal and positive otherwise, so a
/// positive value marks a convex bulge that needs rounding.
pub fn estimate(ring: &mut DenseRing) {
    let n = ring.len();
    if n < 3 {
        return;
    }

    let tangents: Vec<Vector2> = (0..n)
        .map(|i| {
            let chord = ring.samples[ring.next(i)].position - ring.samples[ring.prev(i)].position;
            chord
                .try_normalize(TOLERANCE)
                .unwrap_or(ring.samples[i].tangent)
        })
        .collect();

    for (sample, tangent) in ring.samples.iter_mut().zip(&tangents) {
        sample.tangent = *tangent;
        sample.normal = left_normal(*tangent) * ring.orientation;
    }

    let mut peak: f64 = 0.0;
    for i in 0..n {
        let (left, right) = (ring.prev(i), ring.next(i));
        let span = (ring.samples[right].position - ring.samples[left].position).norm();
        let curvature = if span < TOLERANCE {
            0.0
        } else {
            let second = (tangents[right] - tangents[left]) / span;
            let sign = second.dot(&ring.samples[i].normal).signum();
            -second.norm() * sign
        };
        ring.samples[i].curvature = curvature;
        peak = peak.max(curvature.abs());
    }

    debug!(samples = n, peak_curvature = peak, "estimated curvature");
}
