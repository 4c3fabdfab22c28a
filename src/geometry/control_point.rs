use serde::{Deserialize, Serialize};

use crate::math::{Point2, Vector2};

/// An authored anchor of a closed Bézier curve.
///
/// Tangent handles are offsets relative to `position`. The right handle
/// shapes the segment leaving this point, the left handle the segment
/// arriving at it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub position: Point2,
    pub right_tangent: Vector2,
    pub left_tangent: Vector2,
    /// Half of the curve's thickness at this point.
    pub half_thickness: f64,
}

impl ControlPoint {
    /// Creates a control point with explicit tangent handles.
    #[must_use]
    pub fn new(
        position: Point2,
        right_tangent: Vector2,
        left_tangent: Vector2,
        half_thickness: f64,
    ) -> Self {
        Self {
            position,
            right_tangent,
            left_tangent,
            half_thickness,
        }
    }

    /// Creates a sharp control point (both handles zero).
    #[must_use]
    pub fn corner(position: Point2, half_thickness: f64) -> Self {
        Self::new(position, Vector2::zeros(), Vector2::zeros(), half_thickness)
    }

    /// Absolute position of the right (outgoing) handle.
    #[must_use]
    pub fn right_handle(&self) -> Point2 {
        self.position + self.right_tangent
    }

    /// Absolute position of the left (incoming) handle.
    #[must_use]
    pub fn left_handle(&self) -> Point2 {
        self.position + self.left_tangent
    }

    /// Returns `true` if every coordinate and the thickness are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.coords.iter().all(|v| v.is_finite())
            && self.right_tangent.iter().all(|v| v.is_finite())
            && self.left_tangent.iter().all(|v| v.is_finite())
            && self.half_thickness.is_finite()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_absolute() {
        let cp = ControlPoint::new(
            Point2::new(1.0, 1.0),
            Vector2::new(0.5, 0.0),
            Vector2::new(-0.5, 0.0),
            0.25,
        );
        assert_eq!(cp.right_handle(), Point2::new(1.5, 1.0));
        assert_eq!(cp.left_handle(), Point2::new(0.5, 1.0));
    }

    #[test]
    fn corner_has_zero_handles() {
        let cp = ControlPoint::corner(Point2::new(2.0, 3.0), 0.0);
        assert_eq!(cp.right_handle(), cp.position);
        assert_eq!(cp.left_handle(), cp.position);
    }

    #[test]
    fn non_finite_detected() {
        let cp = ControlPoint::corner(Point2::new(f64::NAN, 0.0), 0.0);
        assert!(!cp.is_finite());
        let cp = ControlPoint::corner(Point2::new(0.0, 0.0), f64::INFINITY);
        assert!(!cp.is_finite());
    }

    #[test]
    fn serde_roundtrip_shape() {
        let cp = ControlPoint::corner(Point2::new(1.0, 2.0), 0.5);
        let json = serde_json::to_string(&cp).unwrap();
        let back: ControlPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(cp, back);
    }
}
