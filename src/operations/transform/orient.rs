use crate::geometry::Path;
use crate::math::Point2;

/// Orients a path so that it starts at the end nearer to a reference point.
///
/// Only the distance from each endpoint to `from` is compared; a path whose
/// endpoints are equally far away is left as is, so the operation is
/// idempotent.
pub struct OrientPath<'a> {
    path: &'a Path,
    from: Point2,
}

impl<'a> OrientPath<'a> {
    /// Creates a new `OrientPath` operation.
    #[must_use]
    pub fn new(path: &'a Path, from: Point2) -> Self {
        Self { path, from }
    }

    /// Returns `true` if the path starts farther from `from` than it ends.
    #[must_use]
    pub fn needs_reversal(&self) -> bool {
        match (self.path.start(), self.path.end()) {
            (Some(start), Some(end)) => (start - self.from).norm() > (end - self.from).norm(),
            _ => false,
        }
    }

    /// Executes the operation, returning the reversed path if reversal was needed.
    #[must_use]
    pub fn execute(&self) -> Option<Path> {
        self.needs_reversal().then(|| self.path.reversed())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn reverses_path_running_backwards() {
        // Start is 50 from A, end is 45 from A.
        let a = Point2::new(0.0, 0.0);
        let path = Path::from_svg("M50,0 L20,10 L0,45").unwrap();
        let oriented = OrientPath::new(&path, a).execute().unwrap();
        assert_eq!(oriented.start(), Some(Point2::new(0.0, 45.0)));
        assert_eq!(oriented.end(), Some(Point2::new(50.0, 0.0)));
    }

    #[test]
    fn keeps_path_running_forwards() {
        let c = Point2::new(0.0, 0.0);
        let path = Path::from_svg("M5,0 L55,0").unwrap();
        assert!(OrientPath::new(&path, c).execute().is_none());
    }

    #[test]
    fn orientation_is_idempotent() {
        let a = Point2::new(100.0, 100.0);
        let path = Path::from_svg("M0,0 Q50,80 90,100").unwrap();
        let once = OrientPath::new(&path, a).execute().unwrap_or(path);
        assert!(OrientPath::new(&once, a).execute().is_none());
    }

    #[test]
    fn compares_first_and_last_points_of_mixed_path() {
        let path = Path::from_svg("M0,0 L10,0 C20,0 20,10 30,10").unwrap();
        let op = OrientPath::new(&path, Point2::new(30.0, 9.0));
        assert!(op.needs_reversal());
        let reversed = op.execute().unwrap();
        assert_eq!(reversed.start(), Some(Point2::new(30.0, 10.0)));
        assert_eq!(reversed.end(), Some(Point2::new(0.0, 0.0)));
    }

    #[test]
    fn equidistant_endpoints_are_left_alone() {
        let path = Path::from_svg("M-1,0 L1,0").unwrap();
        assert!(OrientPath::new(&path, Point2::origin()).execute().is_none());
    }

    #[test]
    fn empty_path_is_left_alone() {
        let path = Path::default();
        assert!(OrientPath::new(&path, Point2::origin()).execute().is_none());
    }
}
