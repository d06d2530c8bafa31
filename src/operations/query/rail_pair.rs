use crate::error::{OperationError, Result};
use crate::geometry::PathSegment;

/// Weight of the parallelism term when scoring edge pairs.
const PARALLEL_WEIGHT: f64 = 10.0;

/// How candidate rail edges are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RailScoring {
    /// `len[i] + len[j] + 10·|cos(angle[i] − angle[j])|` over all six pairs.
    LengthAndParallelism,
    /// The two longest edges, ignoring direction.
    LengthOnly,
}

/// Selects the two edges of a four-sided shape that form its rails.
pub struct SelectRails<'a> {
    edges: &'a [PathSegment],
    scoring: RailScoring,
}

impl<'a> SelectRails<'a> {
    /// Creates a new `SelectRails` query.
    #[must_use]
    pub fn new(edges: &'a [PathSegment], scoring: RailScoring) -> Self {
        Self { edges, scoring }
    }

    /// Executes the selection, returning the indices of the two rail edges.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` unless exactly 4 edges are given.
    pub fn execute(&self) -> Result<[usize; 2]> {
        if self.edges.len() != 4 {
            return Err(OperationError::InvalidInput(format!(
                "rail selection needs exactly 4 edges, got {}",
                self.edges.len()
            ))
            .into());
        }
        let lengths: Vec<f64> = self.edges.iter().map(PathSegment::length).collect();

        match self.scoring {
            RailScoring::LengthAndParallelism => {
                let angles: Vec<f64> = self.edges.iter().map(PathSegment::chord_angle).collect();
                let mut best = [0, 1];
                let mut best_score = f64::NEG_INFINITY;
                for i in 0..4 {
                    for j in (i + 1)..4 {
                        let parallel = (angles[i] - angles[j]).cos().abs();
                        let score = lengths[i] + lengths[j] + PARALLEL_WEIGHT * parallel;
                        if score > best_score {
                            best_score = score;
                            best = [i, j];
                        }
                    }
                }
                Ok(best)
            }
            RailScoring::LengthOnly => {
                let mut order = [0, 1, 2, 3];
                // Longest first; equal lengths prefer the later edge.
                order.sort_by(|&a, &b| lengths[b].total_cmp(&lengths[a]).then(b.cmp(&a)));
                Ok([order[0], order[1]])
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    fn rectangle_edges() -> Vec<PathSegment> {
        let c = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        (0..4)
            .map(|i| PathSegment::line(c[i], c[(i + 1) % 4]))
            .collect()
    }

    fn sorted(pair: [usize; 2]) -> [usize; 2] {
        [pair[0].min(pair[1]), pair[0].max(pair[1])]
    }

    #[test]
    fn rectangle_selects_long_edges() {
        let edges = rectangle_edges();
        for scoring in [RailScoring::LengthAndParallelism, RailScoring::LengthOnly] {
            let pair = SelectRails::new(&edges, scoring).execute().unwrap();
            assert_eq!(sorted(pair), [0, 2], "scoring={scoring:?}");
        }
    }

    #[test]
    fn selection_is_permutation_invariant() {
        let edges = rectangle_edges();
        let perms = [
            [0, 1, 2, 3],
            [1, 0, 3, 2],
            [3, 2, 1, 0],
            [2, 3, 0, 1],
            [1, 3, 0, 2],
            [3, 1, 2, 0],
        ];
        for perm in perms {
            let shuffled: Vec<PathSegment> = perm.iter().map(|&k| edges[k]).collect();
            let pair = SelectRails::new(&shuffled, RailScoring::LengthAndParallelism)
                .execute()
                .unwrap();
            let mut picked = [perm[pair[0]], perm[pair[1]]];
            picked.sort_unstable();
            assert_eq!(picked, [0, 2], "perm={perm:?}");
        }
    }

    #[test]
    fn scoring_prefers_parallel_pair_over_two_longest() {
        // Edges 0 and 2 are parallel; edges 0 and 3 are the two longest.
        let c = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(12.0, 9.0),
            Point2::new(3.0, 9.0),
        ];
        let edges: Vec<PathSegment> = (0..4)
            .map(|i| PathSegment::line(c[i], c[(i + 1) % 4]))
            .collect();
        let scored = SelectRails::new(&edges, RailScoring::LengthAndParallelism)
            .execute()
            .unwrap();
        assert_eq!(sorted(scored), [0, 2]);
        let longest = SelectRails::new(&edges, RailScoring::LengthOnly)
            .execute()
            .unwrap();
        assert_eq!(sorted(longest), [0, 3]);
    }

    #[test]
    fn curved_edges_use_chord_direction() {
        let edges = vec![
            PathSegment::cubic(
                Point2::new(0.0, 0.0),
                Point2::new(3.0, 1.0),
                Point2::new(7.0, 1.0),
                Point2::new(10.0, 0.0),
            ),
            PathSegment::line(Point2::new(10.0, 0.0), Point2::new(10.0, 2.0)),
            PathSegment::cubic(
                Point2::new(10.0, 2.0),
                Point2::new(7.0, 3.0),
                Point2::new(3.0, 3.0),
                Point2::new(0.0, 2.0),
            ),
            PathSegment::line(Point2::new(0.0, 2.0), Point2::new(0.0, 0.0)),
        ];
        let pair = SelectRails::new(&edges, RailScoring::LengthAndParallelism)
            .execute()
            .unwrap();
        assert_eq!(sorted(pair), [0, 2]);
    }

    #[test]
    fn wrong_edge_count() {
        let edges = rectangle_edges();
        assert!(SelectRails::new(&edges[..3], RailScoring::LengthOnly)
            .execute()
            .is_err());
    }
}
