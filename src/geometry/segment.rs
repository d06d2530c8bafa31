use kurbo::ParamCurveArclen;

use crate::math::polygon_2d::left_normal;
use crate::math::{Point2, Vector2};

/// Accuracy used for curve arc-length computation.
const ARCLEN_ACCURACY: f64 = 1e-6;

/// One piece of a path: a straight line or a quadratic/cubic Bézier curve.
///
/// Every variant is parameterized over `t ∈ [0, 1]`, with `point(0)` at the
/// start and `point(1)` at the end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    Line {
        start: Point2,
        end: Point2,
    },
    Quadratic {
        start: Point2,
        control: Point2,
        end: Point2,
    },
    Cubic {
        start: Point2,
        c1: Point2,
        c2: Point2,
        end: Point2,
    },
}

impl PathSegment {
    /// Creates a straight line segment.
    #[must_use]
    pub fn line(start: Point2, end: Point2) -> Self {
        Self::Line { start, end }
    }

    /// Creates a cubic Bézier segment.
    #[must_use]
    pub fn cubic(start: Point2, c1: Point2, c2: Point2, end: Point2) -> Self {
        Self::Cubic { start, c1, c2, end }
    }

    /// Returns the start point (`t = 0`).
    #[must_use]
    pub fn start(&self) -> Point2 {
        match *self {
            Self::Line { start, .. } | Self::Quadratic { start, .. } | Self::Cubic { start, .. } => {
                start
            }
        }
    }

    /// Returns the end point (`t = 1`).
    #[must_use]
    pub fn end(&self) -> Point2 {
        match *self {
            Self::Line { end, .. } | Self::Quadratic { end, .. } | Self::Cubic { end, .. } => end,
        }
    }

    /// Evaluates the segment at parameter `t`.
    #[must_use]
    pub fn point(&self, t: f64) -> Point2 {
        let mt = 1.0 - t;
        match *self {
            Self::Line { start, end } => start + (end - start) * t,
            Self::Quadratic {
                start,
                control,
                end,
            } => Point2::from(
                start.coords * (mt * mt) + control.coords * (2.0 * mt * t) + end.coords * (t * t),
            ),
            Self::Cubic { start, c1, c2, end } => Point2::from(
                start.coords * (mt * mt * mt)
                    + c1.coords * (3.0 * mt * mt * t)
                    + c2.coords * (3.0 * mt * t * t)
                    + end.coords * (t * t * t),
            ),
        }
    }

    /// Computes the first derivative with respect to `t`.
    #[must_use]
    pub fn derivative(&self, t: f64) -> Vector2 {
        let mt = 1.0 - t;
        match *self {
            Self::Line { start, end } => end - start,
            Self::Quadratic {
                start,
                control,
                end,
            } => (control - start) * (2.0 * mt) + (end - control) * (2.0 * t),
            Self::Cubic { start, c1, c2, end } => {
                (c1 - start) * (3.0 * mt * mt) + (c2 - c1) * (6.0 * mt * t) + (end - c2) * (3.0 * t * t)
            }
        }
    }

    /// Returns the unit normal at `t`: the unit tangent rotated by +90°.
    ///
    /// Where the derivative vanishes the normal is the zero vector.
    #[must_use]
    pub fn normal(&self, t: f64) -> Vector2 {
        left_normal(&self.derivative(t))
    }

    /// Samples `n` points and their normals at evenly spaced `t` over `[0, 1]`.
    ///
    /// `n` is clamped to at least 2 so both endpoints are always included.
    #[must_use]
    pub fn sample_with_normals(&self, n: usize) -> Vec<(Point2, Vector2)> {
        let n = n.max(2);
        (0..n)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let t = i as f64 / (n - 1) as f64;
                (self.point(t), self.normal(t))
            })
            .collect()
    }

    /// Returns the arc length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        match *self {
            Self::Line { start, end } => (end - start).norm(),
            _ => self.to_kurbo().arclen(ARCLEN_ACCURACY),
        }
    }

    /// Returns the direction angle of the chord from start to end, in radians.
    #[must_use]
    pub fn chord_angle(&self) -> f64 {
        let chord = self.end() - self.start();
        chord.y.atan2(chord.x)
    }

    /// Returns the same geometry traversed from end to start.
    #[must_use]
    pub fn reversed(&self) -> Self {
        match *self {
            Self::Line { start, end } => Self::Line {
                start: end,
                end: start,
            },
            Self::Quadratic {
                start,
                control,
                end,
            } => Self::Quadratic {
                start: end,
                control,
                end: start,
            },
            Self::Cubic { start, c1, c2, end } => Self::Cubic {
                start: end,
                c1: c2,
                c2: c1,
                end: start,
            },
        }
    }

    /// Converts to the equivalent `kurbo` segment.
    #[must_use]
    pub fn to_kurbo(&self) -> kurbo::PathSeg {
        match *self {
            Self::Line { start, end } => kurbo::Line::new(to_kurbo(start), to_kurbo(end)).into(),
            Self::Quadratic {
                start,
                control,
                end,
            } => kurbo::QuadBez::new(to_kurbo(start), to_kurbo(control), to_kurbo(end)).into(),
            Self::Cubic { start, c1, c2, end } => kurbo::CubicBez::new(
                to_kurbo(start),
                to_kurbo(c1),
                to_kurbo(c2),
                to_kurbo(end),
            )
            .into(),
        }
    }
}

pub(crate) fn to_kurbo(p: Point2) -> kurbo::Point {
    kurbo::Point::new(p.x, p.y)
}

pub(crate) fn from_kurbo(p: kurbo::Point) -> Point2 {
    Point2::new(p.x, p.y)
}
