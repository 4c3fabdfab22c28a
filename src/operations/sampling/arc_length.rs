use std::f64::consts::PI;

use tracing::debug;

use crate::error::{InputError, Result};
use crate::geometry::DenseRing;
use crate::math::{Vector2, TOLERANCE};

/// Raised-cosine blend between `a` and `b` at `t` in `[0, 1]`.
///
/// Unlike a linear blend, the slope is zero at both ends, so consecutive
/// segments join with a C¹ thickness profile.
#[must_use]
pub fn smooth_blend(t: f64, a: f64, b: f64) -> f64 {
    let w = 0.5 * (1.0 - (PI * t).cos());
    a * (1.0 - w) + b * w
}

/// Recomputes cumulative arc length, per-segment length and total length
/// from the current sample positions.
///
/// # Errors
///
/// Returns `InputError::ZeroLength` if the closed ring has no extent.
pub fn measure(ring: &mut DenseRing) -> Result<()> {
    let n = ring.len();
    if n == 0 {
        return Err(InputError::ZeroLength.into());
    }

    let mut acc = 0.0;
    ring.samples[0].arc_length = 0.0;
    for i in 1..n {
        acc += (ring.samples[i].position - ring.samples[i - 1].position).norm();
        ring.samples[i].arc_length = acc;
    }
    acc += (ring.samples[0].position - ring.samples[n - 1].position).norm();
    ring.total_length = acc;

    if ring.total_length.is_nan() || ring.total_length <= TOLERANCE {
        return Err(InputError::ZeroLength.into());
    }

    let q = ring.samples_per_segment;
    let segments = n / q;
    ring.segment_lengths = (0..segments)
        .map(|k| {
            let start = ring.samples[k * q].arc_length;
            let end = if k + 1 == segments {
                ring.total_length
            } else {
                ring.samples[(k + 1) * q].arc_length
            };
            end - start
        })
        .collect();

    Ok(())
}

/// Interpolates each sample's half-thickness along its segment, pushes the
/// sample out along its normal by that thickness plus `height_offset`, and
/// scales the result into world units. Arc length is re-measured afterwards
/// since the displacement changes every chord.
///
/// Expects `ring` to have been measured.
///
/// # Errors
///
/// Returns `InputError::ZeroLength` if the displaced ring collapses.
pub fn apply_thickness(
    ring: &mut DenseRing,
    height_offset: f64,
    world_scale: &Vector2,
) -> Result<()> {
    let q = ring.samples_per_segment;
    let starts: Vec<f64> = (0..ring.segment_lengths.len())
        .map(|k| ring.samples[k * q].arc_length)
        .collect();

    for i in 0..ring.len() {
        let seg = ring.segment_of(i);
        let seg_len = ring.segment_lengths[seg];
        let sample = &mut ring.samples[i];
        let t = if seg_len < TOLERANCE {
            0.0
        } else {
            (sample.arc_length - starts[seg]) / seg_len
        };
        let h = smooth_blend(t, sample.start_thickness, sample.end_thickness);
        sample.half_thickness = h;

        let displaced = sample.position + sample.normal * (h + height_offset);
        sample.position = displaced.coords.component_mul(world_scale).into();
    }

    measure(ring)?;
    debug!(
        total_length = ring.total_length,
        height_offset, "applied thickness profile"
    );
    Ok(())
}
