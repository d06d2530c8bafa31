use super::{Point2, Vector2, TOLERANCE};

/// Computes the arithmetic mean of a point cloud.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn centroid(points: &[Point2]) -> Option<Point2> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector2::zeros(), |acc, p| acc + p.coords);
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    Some(Point2::from(sum / n))
}

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
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

/// Returns the left-pointing normal of a direction vector (rotation by +90°).
///
/// The result is unit length, or the zero vector when `dir` is ~0.
#[must_use]
pub fn left_normal(dir: &Vector2) -> Vector2 {
    let len = dir.norm();
    if len < TOLERANCE {
        return Vector2::zeros();
    }
    Vector2::new(-dir.y / len, dir.x / len)
}
