use itertools::iproduct;

use crate::error::Result;
use crate::point_cloud::{matched_dimension, PointCloud};

/// Minimum Euclidean distance over all reference/query pairs by exhaustive
/// scan. O(n * q), always correct; the reference for the alternating method.
pub fn closest_pair_exhaustive(reference: &PointCloud, query: &PointCloud) -> Result<f64> {
    matched_dimension(reference, query)?;

    let best = iproduct!(reference.iter(), query.iter())
        .map(|(p, q)| p.distance_squared(q))
        .fold(f64::INFINITY, f64::min);
    Ok(best.sqrt())
}
