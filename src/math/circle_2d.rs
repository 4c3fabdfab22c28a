use super::{Point2, Vector2, TOLERANCE};

/// Returns the circumcenter of the triangle `(a, b, c)`.
///
/// Returns `None` when the three points are (nearly) collinear.
#[must_use]
pub fn circumcenter(a: &Point2, b: &Point2, c: &Point2) -> Option<Point2> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < TOLERANCE {
        return None;
    }
    let a2 = a.coords.norm_squared();
    let b2 = b.coords.norm_squared();
    let c2 = c.coords.norm_squared();
    let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
    Some(Point2::new(ux, uy))
}

/// Mirrors `point` across the line through `origin` with unit direction
/// `axis`: the component of `point - origin` along `axis` is kept and the
/// perpendicular component is negated.
#[must_use]
pub fn mirror_across_line(point: &Point2, origin: &Point2, axis: &Vector2) -> Point2 {
    let d = point - origin;
    let along = axis * d.dot(axis);
    point - (d - along) * 2.0
}

/// Radius of the circle tangent at `origin` to the line with unit normal
/// `normal`, centered at `origin - normal * r`, that passes through `point`.
///
/// Returns `None` if no such circle exists on that side of the tangent
/// line (the point lies on or beyond it).
#[must_use]
pub fn tangent_circle_radius(origin: &Point2, normal: &Vector2, point: &Point2) -> Option<f64> {
    let d = point - origin;
    let along = d.dot(normal);
    if along > -TOLERANCE {
        return None;
    }
    Some(-d.norm_squared() / (2.0 * along))
}
