//! Closest pair between two clouds via alternating nearest-neighbor
//! projection.
//!
//! From a reference anchor, hop to its nearest query point, then back to the
//! nearest reference point, until the round trip returns to the same anchor.
//! When the clouds' convex hulls are disjoint the fixed point is the global
//! closest pair; otherwise the walk can settle on a local pair, so the
//! iteration cap fails loudly instead of returning a possibly-wrong answer.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::kd_tree::KdTree;
use crate::point_cloud::{matched_dimension, PointCloud};

pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Outcome of a closest-pair search: the minimum distance, the witness index
/// in each cloud, and the (reference, query) anchors visited on the way
#[derive(Clone, Debug, Serialize)]
pub struct ClosestPairResult {
    pub distance: f64,
    pub reference_index: usize,
    pub query_index: usize,
    pub trace: Vec<(usize, usize)>,
}

#[derive(Clone, Copy, Debug)]
pub struct AlternatingSearch {
    max_iterations: usize,
}

impl Default for AlternatingSearch {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl AlternatingSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn find(&self, reference: &PointCloud, query: &PointCloud) -> Result<ClosestPairResult> {
        matched_dimension(reference, query)?;

        // The two builds only read their own cloud
        let (reference_tree, query_tree) =
            rayon::join(|| KdTree::build(reference), || KdTree::build(query));
        let reference_tree = reference_tree?;
        let query_tree = query_tree?;

        let mut r = 0;
        let mut trace = Vec::new();
        for _ in 0..self.max_iterations {
            let (q, _) = query_tree.query_nearest(&reference[r])?;
            let (next, _) = reference_tree.query_nearest(&query[q])?;
            trace.push((r, q));
            if next == r {
                let distance = reference[r].distance(&query[q]);
                return Ok(ClosestPairResult {
                    distance,
                    reference_index: r,
                    query_index: q,
                    trace,
                });
            }
            r = next;
        }

        Err(Error::NonConvergence {
            iterations: self.max_iterations,
        })
    }
}

/// Closest pair with the default iteration cap. Correct when the two clouds'
/// convex hulls are disjoint (a documented precondition, not verified here);
/// on `NonConvergence`, fall back to `closest_pair_exhaustive`.
pub fn closest_pair_alternating(
    reference: &PointCloud,
    query: &PointCloud,
) -> Result<ClosestPairResult> {
    AlternatingSearch::default().find(reference, query)
}
