use crate::geometry::PathSegment;
use crate::math::Point2;

/// Default number of samples used to refit offset curves.
pub const DEFAULT_CURVE_SAMPLES: usize = 50;

/// Offsets a single path segment along its local normal.
///
/// # Sign Convention
///
/// The normal is the tangent rotated by +90°; a positive distance moves the
/// segment toward that side, a negative distance toward the other.
///
/// Lines are offset exactly. Curves are approximated: the segment is sampled,
/// each sample is displaced along its own normal, and a cubic is rebuilt from
/// the displaced samples at the start, one third, two thirds and the end.
/// Endpoints are exact, interior shape is approximate.
#[derive(Debug)]
pub struct SegmentOffset {
    segment: PathSegment,
    distance: f64,
    samples: usize,
}

impl SegmentOffset {
    /// Creates a new segment offset operation.
    #[must_use]
    pub fn new(segment: PathSegment, distance: f64) -> Self {
        Self {
            segment,
            distance,
            samples: DEFAULT_CURVE_SAMPLES,
        }
    }

    /// Sets the number of samples used to refit curved segments.
    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Executes the offset.
    #[must_use]
    pub fn execute(&self) -> PathSegment {
        match self.segment {
            PathSegment::Line { .. } => {
                let [(p0, n0), (p1, n1)] = [0.0, 1.0].map(|t| {
                    (self.segment.point(t), self.segment.normal(t))
                });
                PathSegment::line(p0 + n0 * self.distance, p1 + n1 * self.distance)
            }
            PathSegment::Quadratic { .. } | PathSegment::Cubic { .. } => {
                let displaced: Vec<Point2> = self
                    .segment
                    .sample_with_normals(self.samples)
                    .into_iter()
                    .map(|(p, n)| p + n * self.distance)
                    .collect();
                let m = displaced.len();
                if m < 4 {
                    return PathSegment::line(displaced[0], displaced[m - 1]);
                }
                PathSegment::cubic(
                    displaced[0],
                    displaced[m / 3],
                    displaced[2 * m / 3],
                    displaced[m - 1],
                )
            }
        }
    }
}
