use nalgebra::DMatrix;

use crate::error::{GeometryError, Result};
use crate::geometry::PathSegment;
use crate::math::polygon_2d::centroid;
use crate::math::{Point2, Vector2, TOLERANCE};

/// Fits the principal axis of a point cloud and returns it as a line segment.
///
/// The direction is the right singular vector of the centered point matrix
/// with the largest singular value. The returned segment runs from the
/// minimum to the maximum projection of the points onto that direction, so it
/// spans the full extent of the data along the axis.
pub struct PrincipalAxis<'a> {
    points: &'a [Point2],
}

impl<'a> PrincipalAxis<'a> {
    /// Creates a new `PrincipalAxis` query.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self { points }
    }

    /// Executes the fit.
    ///
    /// # Errors
    ///
    /// - `GeometryError::InsufficientPoints` if fewer than 2 points are given
    /// - `GeometryError::DecompositionFailed` if the SVD does not converge
    /// - `GeometryError::Degenerate` if all points coincide
    pub fn execute(&self) -> Result<PathSegment> {
        let n = self.points.len();
        if n < 2 {
            return Err(GeometryError::InsufficientPoints {
                required: 2,
                actual: n,
            }
            .into());
        }
        let mean = centroid(self.points).ok_or(GeometryError::InsufficientPoints {
            required: 2,
            actual: 0,
        })?;

        let centered = DMatrix::from_fn(n, 2, |r, c| self.points[r][c] - mean[c]);
        let svd = centered
            .try_svd(false, true, f64::EPSILON, 0)
            .ok_or(GeometryError::DecompositionFailed)?;
        let v_t = svd.v_t.ok_or(GeometryError::DecompositionFailed)?;

        let k = svd.singular_values.imax();
        if svd.singular_values[k] < TOLERANCE {
            return Err(GeometryError::Degenerate("point cloud has no extent".to_owned()).into());
        }
        let direction = Vector2::new(v_t[(k, 0)], v_t[(k, 1)]);

        let (min_proj, max_proj) = self
            .points
            .iter()
            .map(|p| (p - mean).dot(&direction))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            });

        Ok(PathSegment::line(
            mean + direction * min_proj,
            mean + direction * max_proj,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Path;

    /// Asserts that `seg` joins `a` and `b` in either direction.
    fn assert_endpoints(seg: &PathSegment, a: Point2, b: Point2, tol: f64) {
        let (s, e) = (seg.start(), seg.end());
        let forward = (s - a).norm() < tol && (e - b).norm() < tol;
        let backward = (s - b).norm() < tol && (e - a).norm() < tol;
        assert!(forward || backward, "got {s} -> {e}, expected {a} -> {b}");
    }

    #[test]
    fn collinear_points() {
        let pts = vec![
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
            Point2::new(4.0, 4.0),
        ];
        let seg = PrincipalAxis::new(&pts).execute().unwrap();
        assert_endpoints(&seg, Point2::new(1.0, 1.0), Point2::new(4.0, 4.0), 1e-9);
    }

    #[test]
    fn rectangle_centerline() {
        let path = Path::from_svg("M0,0 L10,0 L10,2 L0,2 Z").unwrap();
        let pts = path.sample(200);
        let seg = PrincipalAxis::new(&pts).execute().unwrap();
        assert_endpoints(&seg, Point2::new(0.0, 1.0), Point2::new(10.0, 1.0), 0.1);
    }

    #[test]
    fn symmetric_polygon_axis_lies_on_symmetry_line() {
        // A diamond symmetric about the line y = x, sampled at segment
        // midpoints so the cloud is symmetric as well.
        let corners = [
            Point2::new(0.0, 0.0),
            Point2::new(6.0, 4.0),
            Point2::new(10.0, 10.0),
            Point2::new(4.0, 6.0),
        ];
        let mut pts = Vec::new();
        for i in 0..4 {
            let seg = PathSegment::line(corners[i], corners[(i + 1) % 4]);
            for j in 0..25 {
                pts.push(seg.point((f64::from(j) + 0.5) / 25.0));
            }
        }
        let seg = PrincipalAxis::new(&pts).execute().unwrap();
        for p in [seg.start(), seg.end()] {
            assert!((p.x - p.y).abs() < 1e-9, "endpoint {p} is off the axis");
        }
        assert_endpoints(&seg, corners[0], corners[2], 0.5);
    }

    #[test]
    fn too_few_points() {
        let pts = vec![Point2::new(1.0, 1.0)];
        assert!(PrincipalAxis::new(&pts).execute().is_err());
    }

    #[test]
    fn coincident_points_are_degenerate() {
        let pts = vec![Point2::new(3.0, 3.0); 10];
        assert!(PrincipalAxis::new(&pts).execute().is_err());
    }
}
