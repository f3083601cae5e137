//! Epsilon-neighbourhood queries.
//!
//! A neighbourhood is the ascending list of dataset indices within `eps` of a
//! query point, the query point included. Brute force and the grid index
//! return identical lists.

mod brute;
#[cfg(feature = "grid")]
mod grid;

use crate::{
    Result,
    dataset::Dataset,
    distance::Metric,
    error::{DatasetError, DbscanError},
};

#[cfg(feature = "grid")]
pub use self::grid::{GRID_MAX_DIMENSION, GRID_MIN_ITEMS};

/// Comparison applied between a distance and `eps`.
///
/// The same bound is used for the seed density test and inside cluster
/// expansion.
///
/// # Examples
/// ```
/// use densa_core::EpsBound;
///
/// assert!(!EpsBound::Strict.admits(1.0, 1.0));
/// assert!(EpsBound::Inclusive.admits(1.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EpsBound {
    /// Neighbours satisfy `distance < eps`.
    #[default]
    Strict,
    /// Neighbours satisfy `distance <= eps`.
    Inclusive,
}

impl EpsBound {
    /// Returns whether `distance` lies inside the radius `eps`.
    #[must_use]
    pub fn admits(self, distance: f64, eps: f64) -> bool {
        match self {
            Self::Strict => distance < eps,
            Self::Inclusive => distance <= eps,
        }
    }
}

/// Selects how neighbourhoods are computed.
///
/// `Auto` resolves deterministically from the metric and dataset shape; both
/// concrete strategies produce the same neighbourhoods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NeighbourSearch {
    /// Use the grid when it is compiled in, supported and worthwhile.
    #[default]
    Auto,
    /// Scan every point for every query.
    BruteForce,
    /// Bucket points into a uniform grid with cells one radius wide.
    Grid,
}

#[derive(Debug)]
enum Index {
    BruteForce,
    #[cfg(feature = "grid")]
    Grid(grid::GridIndex),
}

/// Computes neighbourhoods over one dataset with fixed radius and metric.
///
/// # Examples
/// ```
/// use densa_core::{Dataset, EpsBound, Euclidean, NeighbourSearch, NeighbourhoodQuery};
///
/// let dataset = Dataset::try_new("line", vec![[0.0], [0.5], [2.0]])?;
/// let query = NeighbourhoodQuery::new(
///     &dataset,
///     &Euclidean,
///     1.0,
///     EpsBound::Strict,
///     NeighbourSearch::BruteForce,
/// )?;
/// assert_eq!(query.neighbours(0)?, vec![0, 1]);
/// assert_eq!(query.neighbours(2)?, vec![2]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct NeighbourhoodQuery<'a, M> {
    dataset: &'a Dataset,
    metric: &'a M,
    eps: f64,
    bound: EpsBound,
    index: Index,
}

impl<'a, M: Metric> NeighbourhoodQuery<'a, M> {
    /// Prepares neighbourhood queries, building the grid when selected.
    ///
    /// # Errors
    /// Returns [`DbscanError::SearchUnavailable`] when the grid is requested
    /// but not compiled in, and [`DbscanError::GridUnsupported`] when the
    /// metric is not axis bounded or the dimension is too large.
    pub fn new(
        dataset: &'a Dataset,
        metric: &'a M,
        eps: f64,
        bound: EpsBound,
        search: NeighbourSearch,
    ) -> Result<Self> {
        let index = resolve_index(dataset, metric, eps, search)?;
        Ok(Self {
            dataset,
            metric,
            eps,
            bound,
            index,
        })
    }

    /// Returns the concrete strategy in use after resolving `Auto`.
    #[must_use]
    pub fn strategy(&self) -> NeighbourSearch {
        match self.index {
            Index::BruteForce => NeighbourSearch::BruteForce,
            #[cfg(feature = "grid")]
            Index::Grid(_) => NeighbourSearch::Grid,
        }
    }

    /// Returns the indices within `eps` of `point`, ascending, self included.
    ///
    /// # Errors
    /// Returns [`DbscanError::Dataset`] when `point` is out of bounds and
    /// [`DbscanError::Distance`] when the metric rejects a pair.
    pub fn neighbours(&self, point: usize) -> Result<Vec<usize>> {
        let origin = self.coordinates(point)?;
        match &self.index {
            Index::BruteForce => brute::scan(self, point, origin),
            #[cfg(feature = "grid")]
            Index::Grid(grid) => {
                let candidates = grid.candidates(origin);
                self.filter(point, origin, candidates)
            }
        }
    }

    pub(crate) fn filter(
        &self,
        point: usize,
        origin: &[f64],
        candidates: impl IntoIterator<Item = usize>,
    ) -> Result<Vec<usize>> {
        let mut found = Vec::new();
        for candidate in candidates {
            let coordinates = self.coordinates(candidate)?;
            let distance = self
                .metric
                .distance(origin, coordinates)
                .map_err(|error| DbscanError::Distance {
                    left: point,
                    right: candidate,
                    error,
                })?;
            if self.bound.admits(distance, self.eps) {
                found.push(candidate);
            }
        }
        Ok(found)
    }

    fn coordinates(&self, point: usize) -> Result<&'a [f64]> {
        self.dataset
            .point(point)
            .map_err(|error: DatasetError| DbscanError::Dataset {
                dataset: self.dataset.shared_name(),
                error,
            })
    }
}

#[cfg(feature = "grid")]
fn resolve_index<M: Metric>(
    dataset: &Dataset,
    metric: &M,
    eps: f64,
    search: NeighbourSearch,
) -> Result<Index> {
    let supported = metric.axis_bounded() && dataset.dimension() <= GRID_MAX_DIMENSION;
    match search {
        NeighbourSearch::BruteForce => Ok(Index::BruteForce),
        NeighbourSearch::Auto if supported && dataset.len() >= GRID_MIN_ITEMS => {
            Ok(Index::Grid(grid::GridIndex::build(dataset, eps)))
        }
        NeighbourSearch::Auto => Ok(Index::BruteForce),
        NeighbourSearch::Grid if supported => Ok(Index::Grid(grid::GridIndex::build(dataset, eps))),
        NeighbourSearch::Grid => Err(DbscanError::GridUnsupported {
            metric: std::sync::Arc::from(metric.name()),
            dimension: dataset.dimension(),
        }),
    }
}

#[cfg(not(feature = "grid"))]
fn resolve_index<M: Metric>(
    _dataset: &Dataset,
    _metric: &M,
    _eps: f64,
    search: NeighbourSearch,
) -> Result<Index> {
    match search {
        NeighbourSearch::Auto | NeighbourSearch::BruteForce => Ok(Index::BruteForce),
        NeighbourSearch::Grid => Err(DbscanError::SearchUnavailable {
            requested: NeighbourSearch::Grid,
        }),
    }
}
