/// Cubic Bézier math in the XY plane.
///
/// A segment is given by its four control points `p0, h0, h1, p1`:
/// start point, start handle (absolute), end handle (absolute), end point.
use super::{Point2, Vector2, TOLERANCE};

/// Evaluates a cubic Bézier segment at parameter `t` in `[0, 1]`.
#[must_use]
pub fn bezier_point(t: f64, p0: &Point2, h0: &Point2, h1: &Point2, p1: &Point2) -> Point2 {
    let u = 1.0 - t;
    let uu = u * u;
    let tt = t * t;
    let coords = p0.coords * (uu * u)
        + h0.coords * (3.0 * uu * t)
        + h1.coords * (3.0 * u * tt)
        + p1.coords * (tt * t);
    Point2::from(coords)
}

/// Evaluates the first derivative of a cubic Bézier segment at `t`.
#[must_use]
pub fn bezier_derivative(t: f64, p0: &Point2, h0: &Point2, h1: &Point2, p1: &Point2) -> Vector2 {
    let u = 1.0 - t;
    (h0 - p0) * (3.0 * u * u) + (h1 - h0) * (6.0 * u * t) + (p1 - h1) * (3.0 * t * t)
}

/// Returns the unit tangent of a cubic Bézier segment at `t`.
///
/// The derivative vanishes where a handle coincides with its anchor (e.g.
/// zero handles at `t = 0`). In that case the chord `p1 - p0` is used, then
/// the handle span `h1 - h0`, and finally `+X`.
#[must_use]
pub fn bezier_unit_tangent(t: f64, p0: &Point2, h0: &Point2, h1: &Point2, p1: &Point2) -> Vector2 {
    [
        bezier_derivative(t, p0, h0, h1, p1),
        p1 - p0,
        h1 - h0,
    ]
    .into_iter()
    .find(|v| v.norm() >= TOLERANCE)
    .map_or_else(Vector2::x, |v| v.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn straight() -> (Point2, Point2, Point2, Point2) {
        (
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 0.0),
        )
    }

    #[test]
    fn endpoints_interpolated() {
        let (p0, h0, h1, p1) = (
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 2.0),
            Point2::new(4.0, 2.0),
            Point2::new(4.0, 0.0),
        );
        let a = bezier_point(0.0, &p0, &h0, &h1, &p1);
        let b = bezier_point(1.0, &p0, &h0, &h1, &p1);
        assert_relative_eq!(a, p0, epsilon = 1e-12);
        assert_relative_eq!(b, p1, epsilon = 1e-12);

        // Symmetric arch: apex at t = 0.5, height 3/4 of the handle height.
        let mid = bezier_point(0.5, &p0, &h0, &h1, &p1);
        assert_relative_eq!(mid.x, 2.0, epsilon = 1e-12);
        assert_relative_eq!(mid.y, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn evenly_spaced_handles_give_linear_motion() {
        let (p0, h0, h1, p1) = straight();
        for i in 0..=10 {
            let t = f64::from(i) / 10.0;
            let p = bezier_point(t, &p0, &h0, &h1, &p1);
            assert_relative_eq!(p.x, 3.0 * t, epsilon = 1e-12);
            let d = bezier_derivative(t, &p0, &h0, &h1, &p1);
            assert_relative_eq!(d.x, 3.0, epsilon = 1e-12);
            assert_relative_eq!(d.y, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let (p0, h0, h1, p1) = (
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 3.0),
            Point2::new(3.0, -1.0),
            Point2::new(4.0, 1.0),
        );
        let h = 1e-6;
        for t in [0.1, 0.37, 0.5, 0.9] {
            let fd = (bezier_point(t + h, &p0, &h0, &h1, &p1)
                - bezier_point(t - h, &p0, &h0, &h1, &p1))
                / (2.0 * h);
            let d = bezier_derivative(t, &p0, &h0, &h1, &p1);
            assert_relative_eq!(d, fd, epsilon = 1e-5);
        }
    }

    #[test]
    fn zero_handles_fall_back_to_chord() {
        let p0 = Point2::new(0.0, 0.0);
        let p1 = Point2::new(0.0, 5.0);
        let t = bezier_unit_tangent(0.0, &p0, &p0, &p1, &p1);
        assert_relative_eq!(t, Vector2::new(0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn fully_degenerate_segment_uses_x_axis() {
        let p = Point2::new(2.0, 2.0);
        let t = bezier_unit_tangent(0.5, &p, &p, &p, &p);
        assert_relative_eq!(t, Vector2::x(), epsilon = 1e-12);
    }
}
