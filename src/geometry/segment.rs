use serde::{Deserialize, Serialize};

use crate::math::Point2;

/// A uniform-radius rounded polyline, ready to become one capsule-chain
/// collider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Chain vertices in the caller's coordinate space.
    pub points: Vec<Point2>,
    /// Rounding radius in world units.
    pub radius: f64,
    /// `true` if the chain wraps around; the first point is not repeated.
    pub closed: bool,
}

impl Segment {
    /// Creates an open segment.
    #[must_use]
    pub fn open(points: Vec<Point2>, radius: f64) -> Self {
        Self {
            points,
            radius,
            closed: false,
        }
    }

    /// Creates a closed segment.
    #[must_use]
    pub fn closed(points: Vec<Point2>, radius: f64) -> Self {
        Self {
            points,
            radius,
            closed: true,
        }
    }

    /// Number of straight pieces in the chain.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        let n = self.points.len();
        match (n, self.closed) {
            (0 | 1, _) => 0,
            (_, true) => n,
            (_, false) => n - 1,
        }
    }
}
