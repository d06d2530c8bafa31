use super::{Point2, TOLERANCE};

/// Returns the perpendicular distance from `p` to the infinite line through `a` and `b`.
///
/// Returns `None` when `a` and `b` coincide, since no line is defined.
#[must_use]
pub fn point_to_line_dist(p: &Point2, a: &Point2, b: &Point2) -> Option<f64> {
    let ab = b - a;
    let len = ab.norm();
    if len < TOLERANCE {
        return None;
    }
    // |cross(b - a, a - p)| / |b - a|
    let ap = a - p;
    Some((ab.x * ap.y - ab.y * ap.x).abs() / len)
}
