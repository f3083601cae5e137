//! Full pairwise scan.

use super::NeighbourhoodQuery;
use crate::{Result, distance::Metric};

/// Visits every point in dataset order; O(n) per query.
pub(super) fn scan<M: Metric>(
    query: &NeighbourhoodQuery<'_, M>,
    point: usize,
    origin: &[f64],
) -> Result<Vec<usize>> {
    query.filter(point, origin, 0..query.dataset.len())
}
