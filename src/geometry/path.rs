use kurbo::{BezPath, PathEl};

use super::segment::{from_kurbo, to_kurbo, PathSegment};
use crate::error::{DocumentError, Result};
use crate::math::{Point2, CLOSURE_TOLERANCE};

/// An ordered sequence of segments, as described by an SVG `d` attribute.
///
/// Consecutive segments are expected to share endpoints. A path is closed when
/// its first start point and last end point coincide within
/// [`CLOSURE_TOLERANCE`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// Creates a path from its segments.
    #[must_use]
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Parses SVG path data.
    ///
    /// Arcs are converted to cubic curves by the parser; a `Z` command adds a
    /// closing line only when the current point is not already at the
    /// subpath start.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::InvalidPathData` if the data cannot be parsed.
    pub fn from_svg(data: &str) -> Result<Self> {
        let bez = BezPath::from_svg(data).map_err(|e| DocumentError::InvalidPathData {
            data: data.to_owned(),
            message: e.to_string(),
        })?;

        let mut segments = Vec::new();
        let mut current: Option<Point2> = None;
        let mut subpath_start = Point2::origin();
        for el in bez.elements() {
            match *el {
                PathEl::MoveTo(p) => {
                    subpath_start = from_kurbo(p);
                    current = Some(subpath_start);
                }
                PathEl::LineTo(p) => {
                    let end = from_kurbo(p);
                    if let Some(start) = current {
                        segments.push(PathSegment::line(start, end));
                    }
                    current = Some(end);
                }
                PathEl::QuadTo(c, p) => {
                    let end = from_kurbo(p);
                    if let Some(start) = current {
                        segments.push(PathSegment::Quadratic {
                            start,
                            control: from_kurbo(c),
                            end,
                        });
                    }
                    current = Some(end);
                }
                PathEl::CurveTo(c1, c2, p) => {
                    let end = from_kurbo(p);
                    if let Some(start) = current {
                        segments.push(PathSegment::cubic(
                            start,
                            from_kurbo(c1),
                            from_kurbo(c2),
                            end,
                        ));
                    }
                    current = Some(end);
                }
                PathEl::ClosePath => {
                    if let Some(last) = current {
                        if (last - subpath_start).norm() >= CLOSURE_TOLERANCE {
                            segments.push(PathSegment::line(last, subpath_start));
                        }
                    }
                    current = Some(subpath_start);
                }
            }
        }
        Ok(Self { segments })
    }

    /// Serializes the path as SVG path data.
    ///
    /// A new subpath is started wherever a segment does not begin at the end
    /// of the previous one.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let mut bez = BezPath::new();
        let mut current: Option<Point2> = None;
        for seg in &self.segments {
            let start = seg.start();
            if current.is_none_or(|c| (c - start).norm() >= CLOSURE_TOLERANCE) {
                bez.move_to(to_kurbo(start));
            }
            match *seg {
                PathSegment::Line { end, .. } => bez.line_to(to_kurbo(end)),
                PathSegment::Quadratic { control, end, .. } => {
                    bez.quad_to(to_kurbo(control), to_kurbo(end));
                }
                PathSegment::Cubic { c1, c2, end, .. } => {
                    bez.curve_to(to_kurbo(c1), to_kurbo(c2), to_kurbo(end));
                }
            }
            current = Some(seg.end());
        }
        bez.to_svg()
    }

    /// Returns the segments of the path.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns `true` if the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the start point of the first segment.
    #[must_use]
    pub fn start(&self) -> Option<Point2> {
        self.segments.first().map(PathSegment::start)
    }

    /// Returns the end point of the last segment.
    #[must_use]
    pub fn end(&self) -> Option<Point2> {
        self.segments.last().map(PathSegment::end)
    }

    /// Returns whether the path ends where it starts.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.start(), self.end()) {
            (Some(s), Some(e)) => (s - e).norm() < CLOSURE_TOLERANCE,
            _ => false,
        }
    }

    /// Evaluates the path at `t ∈ [0, 1]`.
    ///
    /// The parameter is distributed over segments in proportion to their arc
    /// length. Returns `None` for an empty path.
    #[must_use]
    pub fn point(&self, t: f64) -> Option<Point2> {
        let lengths = self.segment_lengths();
        self.point_with_lengths(&lengths, t)
    }

    /// Samples `n` points at evenly spaced parameters over `[0, 1]` inclusive.
    ///
    /// `n` is clamped to at least 2. An empty path yields no points.
    #[must_use]
    pub fn sample(&self, n: usize) -> Vec<Point2> {
        let n = n.max(2);
        let lengths = self.segment_lengths();
        (0..n)
            .filter_map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let t = i as f64 / (n - 1) as f64;
                self.point_with_lengths(&lengths, t)
            })
            .collect()
    }

    /// Returns the path traversed backwards: segment order reversed and each
    /// segment reversed.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            segments: self.segments.iter().rev().map(PathSegment::reversed).collect(),
        }
    }

    fn segment_lengths(&self) -> Vec<f64> {
        self.segments.iter().map(PathSegment::length).collect()
    }

    fn point_with_lengths(&self, lengths: &[f64], t: f64) -> Option<Point2> {
        let last = self.segments.last()?;
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return Some(last.end());
        }

        let total: f64 = lengths.iter().sum();
        #[allow(clippy::cast_precision_loss)]
        let count = self.segments.len() as f64;
        // Zero-length paths fall back to uniform weighting.
        let weight = |len: f64| if total > 0.0 { len / total } else { 1.0 / count };

        let mut t0 = 0.0;
        for (seg, &len) in self.segments.iter().zip(lengths) {
            let w = weight(len);
            let t1 = t0 + w;
            if t < t1 && w > 0.0 {
                return Some(seg.point((t - t0) / w));
            }
            t0 = t1;
        }
        Some(last.end())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RECT: &str = "M0,0 L10,0 L10,2 L0,2 Z";

    #[test]
    fn parse_closed_rectangle() {
        let path = Path::from_svg(RECT).unwrap();
        assert_eq!(path.segments().len(), 4);
        assert!(path.is_closed());
        assert_eq!(path.start(), Some(Point2::new(0.0, 0.0)));
    }

    #[test]
    fn explicit_closing_line_is_not_duplicated() {
        let path = Path::from_svg("M0,0 L10,0 L10,2 L0,2 L0,0 Z").unwrap();
        assert_eq!(path.segments().len(), 4);
        assert!(path.is_closed());
    }

    #[test]
    fn parse_curves() {
        let path = Path::from_svg("M0 0 Q5 5 10 0 C12 0 12 4 10 4").unwrap();
        assert!(matches!(path.segments()[0], PathSegment::Quadratic { .. }));
        assert!(matches!(path.segments()[1], PathSegment::Cubic { .. }));
        assert!(!path.is_closed());
    }

    #[test]
    fn open_path_is_not_closed() {
        let path = Path::from_svg("M0,0 L10,0 L10,2").unwrap();
        assert!(!path.is_closed());
    }

    #[test]
    fn empty_path_is_not_closed() {
        let path = Path::from_svg("").unwrap();
        assert!(path.is_empty());
        assert!(!path.is_closed());
        assert!(path.sample(10).is_empty());
    }

    #[test]
    fn invalid_path_data() {
        assert!(Path::from_svg("M0,0 X5,5").is_err());
    }

    #[test]
    fn point_is_length_weighted() {
        // Perimeter 24: t = 10/24 lands exactly on the (10, 0) corner.
        let path = Path::from_svg(RECT).unwrap();
        let p = path.point(10.0 / 24.0).unwrap();
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-9);
        let p = path.point(11.0 / 24.0).unwrap();
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn sample_spans_whole_path() {
        let path = Path::from_svg("M0,0 L10,0 L10,5").unwrap();
        let pts = path.sample(200);
        assert_eq!(pts.len(), 200);
        assert_eq!(pts[0], Point2::new(0.0, 0.0));
        assert_eq!(pts[199], Point2::new(10.0, 5.0));
    }

    #[test]
    fn reversed_swaps_endpoints() {
        let path = Path::from_svg("M0,0 L10,0 C12,0 12,4 10,4").unwrap();
        let rev = path.reversed();
        assert_eq!(rev.start(), path.end());
        assert_eq!(rev.end(), path.start());
        assert!(matches!(rev.segments()[0], PathSegment::Cubic { .. }));
    }

    #[test]
    fn double_reversal_is_identity() {
        for data in ["M1,1 L2,2", RECT, "M0 0 Q5 5 10 0 C12 0 12 4 10 4 L3 3 L0 0"] {
            let path = Path::from_svg(data).unwrap();
            assert_eq!(path.reversed().reversed(), path, "data={data}");
        }
    }

    #[test]
    fn svg_round_trip_preserves_geometry() {
        let path = Path::from_svg("M0 0 Q5 5 10 0 C12 0 12 4 10 4").unwrap();
        let reparsed = Path::from_svg(&path.to_svg()).unwrap();
        assert_eq!(reparsed.segments().len(), 2);
        for (a, b) in path.segments().iter().zip(reparsed.segments()) {
            assert!((a.point(0.5) - b.point(0.5)).norm() < 1e-9);
        }
    }

    #[test]
    fn disjoint_segments_start_new_subpath() {
        let path = Path::new(vec![
            PathSegment::line(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)),
            PathSegment::line(Point2::new(5.0, 5.0), Point2::new(6.0, 5.0)),
        ]);
        let svg = path.to_svg();
        assert_eq!(svg.matches('M').count(), 2, "svg={svg}");
    }
}
