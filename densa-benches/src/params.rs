//! Benchmark parameter types.

use std::fmt;

use densa_core::NeighbourSearch;

/// Parameters for one clustering benchmark run.
#[derive(Clone, Debug)]
pub struct DbscanBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
    /// Coordinates per point.
    pub dimensions: usize,
    /// Neighbour search strategy under test.
    pub search: NeighbourSearch,
}

impl fmt::Display for DbscanBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let search = match self.search {
            NeighbourSearch::Auto => "auto",
            NeighbourSearch::BruteForce => "brute",
            NeighbourSearch::Grid => "grid",
        };
        write!(
            f,
            "n={},d={},search={search}",
            self.point_count, self.dimensions
        )
    }
}
