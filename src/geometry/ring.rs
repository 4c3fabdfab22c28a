use crate::math::{Point2, Vector2};

/// One point of the densely sampled curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Position in the dense ring.
    pub index: usize,
    pub position: Point2,
    /// Unit tangent in the direction of travel.
    pub tangent: Vector2,
    /// Unit normal pointing away from the filled region.
    pub normal: Vector2,
    /// Signed curvature; positive where the border bulges outward.
    pub curvature: f64,
    /// Rounding radius derived from curvature alone.
    pub radius: f64,
    /// Rounding radius after the self-intersection clamp.
    pub max_radius: f64,
    /// Cumulative arc length from the first sample.
    pub arc_length: f64,
    /// Interpolated half-thickness.
    pub half_thickness: f64,
    /// Half-thickness at the start of the source Bézier segment.
    pub start_thickness: f64,
    /// Half-thickness at the end of the source Bézier segment.
    pub end_thickness: f64,
}

impl Sample {
    /// Creates a sample with only its sampled geometry filled in.
    #[must_use]
    pub fn new(index: usize, position: Point2, tangent: Vector2, normal: Vector2) -> Self {
        Self {
            index,
            position,
            tangent,
            normal,
            curvature: 0.0,
            radius: 0.0,
            max_radius: 0.0,
            arc_length: 0.0,
            half_thickness: 0.0,
            start_thickness: 0.0,
            end_thickness: 0.0,
        }
    }

    /// Returns `true` if the rounding radius came from positive curvature.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.curvature > 0.0
    }
}

/// The closed, densely sampled approximation of a curve.
///
/// Indices wrap modulo the sample count.
#[derive(Debug, Clone, Default)]
pub struct DenseRing {
    pub samples: Vec<Sample>,
    /// Samples per Bézier segment.
    pub samples_per_segment: usize,
    /// Arc length of each Bézier segment.
    pub segment_lengths: Vec<f64>,
    /// Total arc length, wrap-around chord included.
    pub total_length: f64,
    /// `+1.0` or `-1.0`; multiplies left normals into outward normals.
    pub orientation: f64,
}

impl DenseRing {
    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if the ring has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Wraps an arbitrary index into the ring.
    #[must_use]
    pub fn wrap(&self, i: usize) -> usize {
        i % self.samples.len()
    }

    /// Index of the sample before `i`.
    #[must_use]
    pub fn prev(&self, i: usize) -> usize {
        self.wrap(i + self.samples.len() - 1)
    }

    /// Index of the sample after `i`.
    #[must_use]
    pub fn next(&self, i: usize) -> usize {
        self.wrap(i + 1)
    }

    /// Bézier segment a sample belongs to.
    #[must_use]
    pub fn segment_of(&self, i: usize) -> usize {
        i / self.samples_per_segment
    }

    /// Sample positions in ring order.
    #[must_use]
    pub fn positions(&self) -> Vec<Point2> {
        self.samples.iter().map(|s| s.position).collect()
    }
}

/// A dense-ring sample kept by the simplifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedSample {
    /// Index into the dense ring.
    pub ring_index: usize,
    pub position: Point2,
    pub normal: Vector2,
    /// Clamped rounding radius.
    pub max_radius: f64,
    /// Whether the radius came from positive curvature.
    pub positive: bool,
}

impl From<&Sample> for SelectedSample {
    fn from(sample: &Sample) -> Self {
        Self {
            ring_index: sample.index,
            position: sample.position,
            normal: sample.normal,
            max_radius: sample.max_radius,
            positive: sample.is_positive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(n: usize) -> DenseRing {
        DenseRing {
            samples: (0..n)
                .map(|i| Sample::new(i, Point2::origin(), Vector2::x(), Vector2::y()))
                .collect(),
            samples_per_segment: 2,
            segment_lengths: Vec::new(),
            total_length: 0.0,
            orientation: 1.0,
        }
    }

    #[test]
    fn neighbours_wrap() {
        let r = ring(6);
        assert_eq!(r.prev(0), 5);
        assert_eq!(r.next(5), 0);
        assert_eq!(r.wrap(13), 1);
        assert_eq!(r.segment_of(5), 2);
    }

    #[test]
    fn selected_sample_copies_fields() {
        let mut s = Sample::new(3, Point2::new(1.0, 2.0), Vector2::x(), Vector2::y());
        s.curvature = 0.5;
        s.max_radius = 0.7;
        let sel = SelectedSample::from(&s);
        assert_eq!(sel.ring_index, 3);
        assert!(sel.positive);
        assert!((sel.max_radius - 0.7).abs() < f64::EPSILON);
    }
}
