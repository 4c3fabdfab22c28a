use tracing::{debug, trace};

use crate::geometry::DenseRing;
use crate::math::circle_2d::{circumcenter, mirror_across_line, tangent_circle_radius};
use crate::math::{Point2, Vector2};

/// Shrinks every sample's rounding radius until its rounding circle no
/// longer swallows any other sample of the ring, then clamps the result to
/// `[min_radius, max_radius]` and stores it in `max_radius`.
///
/// The rounding circle at `i` is tangent to the curve there, centered at
/// `p_i - n_i * r`. Whenever another sample `p_j` lies strictly inside it,
/// the circle is replaced by the one that is still tangent at `p_i` and
/// passes through `p_j`: the circumcircle of `p_i`, `p_j` and `p_j`
/// mirrored across the normal line at `p_i`.
///
/// With `passes == 1` each sample is scanned once and the shrinking circle
/// is carried through that scan. More passes re-scan until a scan finds no
/// violation. A pass count of zero skips the shrink and only clamps.
///
/// The scan visits every pair of samples, so its cost grows with the square
/// of the ring size. Bucketing samples in a uniform grid over the ring's
/// bounding box is the intended speed-up for rings of many thousand samples.
pub fn clamp(ring: &mut DenseRing, min_radius: f64, max_radius: f64, passes: usize) {
    let positions = ring.positions();
    let mut shrunk_count = 0_usize;

    for i in 0..ring.len() {
        let normal = ring.samples[i].normal;
        let start = ring.samples[i].radius;
        let r = shrink(&positions, i, &normal, start, passes);
        if r < start {
            shrunk_count += 1;
            trace!(sample = i, from = start, to = r, "rounding radius shrunk");
        }
        ring.samples[i].max_radius = r.max(min_radius).min(max_radius);
    }

    debug!(
        samples = ring.len(),
        shrunk = shrunk_count,
        passes,
        "clamped rounding radii against self-intersection"
    );
}

/// Largest radius not exceeding `radius` whose tangent circle at sample `i`
/// contains no other sample, within the given pass budget.
fn shrink(
    positions: &[Point2],
    i: usize,
    normal: &Vector2,
    radius: f64,
    passes: usize,
) -> f64 {
    let origin = positions[i];
    let mut r = radius;
    let mut center = origin - normal * r;

    for _ in 0..passes {
        let mut violated = false;
        for (j, point) in positions.iter().enumerate() {
            if j == i || (point - center).norm() >= r {
                continue;
            }
            let mirrored = mirror_across_line(point, &origin, normal);
            let candidate = match circumcenter(&origin, point, &mirrored) {
                Some(c) => (c - origin).norm(),
                // `p_j` on the normal line: mirror coincides with it.
                None => match tangent_circle_radius(&origin, normal, point) {
                    Some(tangent_radius) => tangent_radius,
                    None => continue,
                },
            };
            if candidate < r {
                r = candidate;
                center = origin - normal * r;
                violated = true;
            }
        }
        if !violated {
            break;
        }
    }

    r
}
