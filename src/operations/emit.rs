use tracing::debug;

use crate::error::{ConsistencyError, ParameterError, Result};
use crate::geometry::{Segment, SelectedSample};
use crate::math::{Point2, Vector2};

/// Walks the clustered radii and emits one segment per run of equal radius.
///
/// The walk starts at the first sample whose radius differs from its left
/// neighbour. Every radius change opens a new segment. A segment borrows
/// the neighbouring sample's point whenever that neighbour carries a larger
/// radius, so adjacent chains overlap instead of leaving a gap at the
/// transition. Points are pulled inward by the segment's radius
/// (`p - n * r`) and divided component-wise by `world_scale`.
///
/// When every sample shares one radius the result is a single closed
/// segment.
///
/// # Errors
///
/// Returns `ParameterError::Invalid` if `radii` and `selected` differ in
/// length, and `ConsistencyError::SegmentCountMismatch` if
/// `expected_segments` is set and does not match the emitted count.
#[allow(clippy::float_cmp)]
pub fn emit(
    selected: &[SelectedSample],
    radii: &[f64],
    world_scale: &Vector2,
    expected_segments: Option<usize>,
) -> Result<Vec<Segment>> {
    if selected.len() != radii.len() {
        return Err(ParameterError::Invalid(format!(
            "{} radii for {} selected samples",
            radii.len(),
            selected.len()
        ))
        .into());
    }

    let m = selected.len();
    let inset = |at: usize, radius: f64| -> Point2 {
        let p = selected[at].position - selected[at].normal * radius;
        Point2::new(p.x / world_scale.x, p.y / world_scale.y)
    };

    let start = (0..m).find(|&i| radii[i] != radii[(i + m - 1) % m]);
    let segments = match start {
        None if m == 0 => Vec::new(),
        None => {
            let radius = radii[0];
            vec![Segment::closed((0..m).map(|i| inset(i, radius)).collect(), radius)]
        }
        Some(start) => {
            let mut segments: Vec<Segment> = Vec::new();
            for offset in 0..m {
                let i = (start + offset) % m;
                let left = (i + m - 1) % m;
                let right = (i + 1) % m;
                let radius = radii[i];

                if radius != radii[left] {
                    segments.push(Segment::open(Vec::new(), radius));
                }
                // The walk starts on a radius change, so a segment is open.
                let Some(segment) = segments.last_mut() else {
                    continue;
                };
                if radius < radii[left] {
                    segment.points.push(inset(left, radius));
                }
                segment.points.push(inset(i, radius));
                if radius < radii[right] {
                    segment.points.push(inset(right, radius));
                }
            }
            segments
        }
    };

    if let Some(expected) = expected_segments {
        if expected != segments.len() {
            return Err(ConsistencyError::SegmentCountMismatch {
                expected,
                actual: segments.len(),
            }
            .into());
        }
    }

    debug!(
        selected = m,
        segments = segments.len(),
        "emitted capsule-chain segments"
    );
    Ok(segments)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::RoundchainError;
    use approx::assert_relative_eq;

    /// Samples on a 2 x 2 square's corners and edge midpoints, CCW, with
    /// outward normals.
    fn square_samples() -> Vec<SelectedSample> {
        let raw = [
            ((0.0, 0.0), (-1.0, -1.0)),
            ((1.0, 0.0), (0.0, -1.0)),
            ((2.0, 0.0), (1.0, -1.0)),
            ((2.0, 1.0), (1.0, 0.0)),
            ((2.0, 2.0), (1.0, 1.0)),
            ((1.0, 2.0), (0.0, 1.0)),
            ((0.0, 2.0), (-1.0, 1.0)),
            ((0.0, 1.0), (-1.0, 0.0)),
        ];
        raw.iter()
            .enumerate()
            .map(|(i, &((x, y), (nx, ny)))| SelectedSample {
                ring_index: i * 10,
                position: Point2::new(x, y),
                normal: Vector2::new(nx, ny).normalize(),
                max_radius: 0.5,
                positive: true,
            })
            .collect()
    }

    #[test]
    fn uniform_radius_gives_one_closed_segment() {
        let sel = square_samples();
        let radii = vec![0.5; sel.len()];
        let out = emit(&sel, &radii, &Vector2::new(1.0, 1.0), Some(1)).unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].closed);
        assert_eq!(out[0].points.len(), sel.len());
        // Edge midpoint (1, 0) with normal -Y moves up by the radius.
        assert_relative_eq!(out[0].points[1].y, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn smaller_run_borrows_larger_neighbours() {
        let sel = square_samples();
        let radii = vec![0.2, 0.2, 0.2, 0.6, 0.6, 0.6, 0.6, 0.6];
        let out = emit(&sel, &radii, &Vector2::new(1.0, 1.0), Some(2)).unwrap();
        assert_eq!(out.len(), 2);

        // Index 0 already differs from index 7, so the small run comes first:
        // indices 0..=2 plus both larger neighbours (7 and 3).
        let small = &out[0];
        assert_relative_eq!(small.radius, 0.2);
        assert!(!small.closed);
        assert_eq!(small.points.len(), 5);
        let first = small.points[0];
        assert_relative_eq!(first.x, 0.2, epsilon = 1e-12);
        assert_relative_eq!(first.y, 1.0, epsilon = 1e-12);

        let big = &out[1];
        assert_relative_eq!(big.radius, 0.6);
        assert_eq!(big.points.len(), 5);
    }

    #[test]
    fn points_are_divided_by_world_scale() {
        let sel = square_samples();
        let radii = vec![0.5; sel.len()];
        let out = emit(&sel, &radii, &Vector2::new(2.0, 4.0), None).unwrap();
        let p = out[0].points[5];
        assert_relative_eq!(p.x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.5 / 4.0, epsilon = 1e-12);
        assert_relative_eq!(out[0].radius, 0.5);
    }

    #[test]
    fn count_mismatch_is_reported() {
        let sel = square_samples();
        let radii = vec![0.2, 0.2, 0.6, 0.6, 0.2, 0.2, 0.6, 0.6];
        let err = emit(&sel, &radii, &Vector2::new(1.0, 1.0), Some(3)).unwrap_err();
        assert!(matches!(
            err,
            RoundchainError::Consistency(ConsistencyError::SegmentCountMismatch {
                expected: 3,
                actual: 4
            })
        ));
    }

    #[test]
    fn length_mismatch_is_invalid() {
        let sel = square_samples();
        let err = emit(&sel, &[0.5], &Vector2::new(1.0, 1.0), None).unwrap_err();
        assert!(matches!(err, RoundchainError::Parameter(_)));
    }

    #[test]
    fn empty_selection_emits_nothing() {
        let out = emit(&[], &[], &Vector2::new(1.0, 1.0), Some(0)).unwrap();
        assert!(out.is_empty());
    }
}
