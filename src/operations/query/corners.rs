use crate::error::{GeometryError, Result};
use crate::math::distance_2d::point_to_line_dist;
use crate::math::Point2;

/// Estimates the four corners of a densely sampled closed quadrilateral.
///
/// # Algorithm
///
/// 1. The farthest pair of samples `(i1, i2)` is taken as the long diagonal.
/// 2. The sample farthest from the infinite line through `i1` and `i2` is
///    taken as a third corner `i3`.
/// 3. The fourth corner is the sample half the sequence length away from
///    `i3` (wrapping around). This assumes corners are roughly evenly spaced
///    in sampling order, which only holds for near-convex, near-uniformly
///    sampled shapes.
/// 4. The indices are sorted so consecutive corners follow the outline.
pub struct DetectCorners<'a> {
    points: &'a [Point2],
}

impl<'a> DetectCorners<'a> {
    /// Creates a new `DetectCorners` query.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self { points }
    }

    /// Executes the detection, returning four ascending indices into the samples.
    ///
    /// # Errors
    ///
    /// - `GeometryError::InsufficientPoints` if fewer than 4 samples are given
    /// - `GeometryError::Degenerate` if all samples coincide
    pub fn execute(&self) -> Result<[usize; 4]> {
        let pts = self.points;
        let n = pts.len();
        if n < 4 {
            return Err(GeometryError::InsufficientPoints {
                required: 4,
                actual: n,
            }
            .into());
        }

        // First maximum in row-major order.
        let mut diagonal = (0, 0);
        let mut best = f64::NEG_INFINITY;
        for (i, a) in pts.iter().enumerate() {
            for (j, b) in pts.iter().enumerate() {
                let d = (b - a).norm_squared();
                if d > best {
                    best = d;
                    diagonal = (i, j);
                }
            }
        }
        let (i1, i2) = diagonal;

        let mut i3 = 0;
        let mut best = f64::NEG_INFINITY;
        for (k, p) in pts.iter().enumerate() {
            let d = point_to_line_dist(p, &pts[i1], &pts[i2]).ok_or_else(|| {
                GeometryError::Degenerate("all samples coincide".to_owned())
            })?;
            if d > best {
                best = d;
                i3 = k;
            }
        }

        let i4 = (i3 + n / 2) % n;

        let mut corners = [i1, i3, i2, i4];
        corners.sort_unstable();
        Ok(corners)
    }
}
