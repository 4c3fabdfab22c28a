use tracing::debug;

use crate::error::{InputError, ParameterError, Result};
use crate::geometry::{ControlPoint, DenseRing, Sample};
use crate::math::bezier_2d::{bezier_point, bezier_unit_tangent};
use crate::math::polygon_2d::{left_normal, outward_coefficient};
use crate::math::Point2;

/// Samples a closed cubic Bézier curve into a dense ring.
///
/// One segment runs from each control point to the next (the last one wraps
/// to the first). Each segment is evaluated at `samples_per_segment` evenly
/// spaced parameters in `[0, 1)`, so the ring holds exactly
/// `points.len() * samples_per_segment` samples.
///
/// Normals are the left perpendicular of the Bézier tangent, flipped for
/// counter-clockwise control polygons so they always point outward. Every
/// sample records its segment's endpoint half-thicknesses; arc length and
/// the interpolated thickness are filled in by [`super::arc_length`].
///
/// # Errors
///
/// Returns `InputError::TooFewControlPoints` for fewer than 3 points,
/// `InputError::NonFinite` for NaN/infinite input, or
/// `ParameterError::Invalid` if `samples_per_segment` is zero.
pub fn build(points: &[ControlPoint], samples_per_segment: usize) -> Result<DenseRing> {
    if points.len() < 3 {
        return Err(InputError::TooFewControlPoints {
            count: points.len(),
        }
        .into());
    }
    if let Some(i) = points.iter().position(|p| !p.is_finite()) {
        return Err(InputError::NonFinite(format!("control point {i}")).into());
    }
    if samples_per_segment == 0 {
        return Err(
            ParameterError::Invalid("samples per segment must be positive".to_owned()).into(),
        );
    }

    let n = points.len();
    let anchors: Vec<Point2> = points.iter().map(|p| p.position).collect();
    let orientation = outward_coefficient(&anchors);

    let mut samples = Vec::with_capacity(n * samples_per_segment);
    #[allow(clippy::cast_precision_loss)]
    let step = 1.0 / samples_per_segment as f64;

    for i in 0..n {
        let first = &points[i];
        let second = &points[(i + 1) % n];
        let p0 = first.position;
        let h0 = first.right_handle();
        let h1 = second.left_handle();
        let p1 = second.position;

        for j in 0..samples_per_segment {
            #[allow(clippy::cast_precision_loss)]
            let t = step * j as f64;
            let position = bezier_point(t, &p0, &h0, &h1, &p1);
            let tangent = bezier_unit_tangent(t, &p0, &h0, &h1, &p1);
            let normal = left_normal(tangent) * orientation;

            let mut sample = Sample::new(samples.len(), position, tangent, normal);
            sample.start_thickness = first.half_thickness;
            sample.end_thickness = second.half_thickness;
            samples.push(sample);
        }
    }

    debug!(
        control_points = n,
        samples = samples.len(),
        orientation,
        "sampled closed bezier curve"
    );

    Ok(DenseRing {
        samples,
        samples_per_segment,
        segment_lengths: vec![0.0; n],
        total_length: 0.0,
        orientation,
    })
}
