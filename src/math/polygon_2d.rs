use super::{Point2, Vector2};

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns the coefficient that turns a left normal into an outward normal
/// for a closed polygon with the given vertices.
///
/// Counter-clockwise polygons have their interior on the left, so the left
/// normal is flipped (`-1.0`). Clockwise and degenerate polygons keep it.
#[must_use]
pub fn outward_coefficient(points: &[Point2]) -> f64 {
    if signed_area_2d(points) > 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Closed-polyline length including the wrap-around chord.
#[must_use]
pub fn closed_length(points: &[Point2]) -> f64 {
    let n = points.len();
    (0..n).map(|i| (points[(i + 1) % n] - points[i]).norm()).sum()
}
