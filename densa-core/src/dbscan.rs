//! Clustering entry points.
//!
//! Provides the configured [`Dbscan`] runtime and the [`cluster`] shortcut
//! that returns sentinel labels directly.

use std::{num::NonZeroUsize, sync::Arc};

use tracing::{info, instrument, warn};

use crate::{
    Result,
    builder::DbscanBuilder,
    dataset::Dataset,
    distance::{Euclidean, Metric},
    engine::Steps,
    error::DbscanError,
    neighbourhood::{EpsBound, NeighbourSearch, NeighbourhoodQuery},
    result::ClusteringResult,
};

/// Density-based clustering with a fixed radius and density threshold.
///
/// # Examples
/// ```
/// use densa_core::{Dataset, DbscanBuilder};
///
/// let dataset = Dataset::try_new("pairs", vec![[0.0, 0.0], [0.0, 0.1], [4.0, 4.0]])?;
/// let dbscan = DbscanBuilder::new()
///     .with_eps(0.5)
///     .with_min_samples(2)
///     .build()?;
/// let result = dbscan.run(&dataset)?;
/// assert_eq!(result.labels(), vec![0, 0, -1]);
/// assert_eq!(result.cluster_count(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Dbscan<M = Euclidean> {
    eps: f64,
    min_samples: NonZeroUsize,
    bound: EpsBound,
    search: NeighbourSearch,
    metric: M,
}

impl<M: Metric> Dbscan<M> {
    pub(crate) fn new(
        eps: f64,
        min_samples: NonZeroUsize,
        bound: EpsBound,
        search: NeighbourSearch,
        metric: M,
    ) -> Self {
        Self {
            eps,
            min_samples,
            bound,
            search,
            metric,
        }
    }

    /// Returns the neighbourhood radius.
    #[must_use]
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Returns the minimum neighbourhood size, self included, of a core point.
    #[must_use]
    pub fn min_samples(&self) -> NonZeroUsize {
        self.min_samples
    }

    /// Returns the comparison applied between distances and `eps`.
    #[must_use]
    pub fn bound(&self) -> EpsBound {
        self.bound
    }

    /// Returns the requested neighbour search strategy.
    #[must_use]
    pub fn neighbour_search(&self) -> NeighbourSearch {
        self.search
    }

    /// Returns the configured metric.
    #[must_use]
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Clusters `dataset` and returns one assignment per point.
    ///
    /// # Errors
    /// Returns [`DbscanError::EmptyDataset`] when the dataset has no points,
    /// [`DbscanError::GridUnsupported`] or [`DbscanError::SearchUnavailable`]
    /// when the requested neighbour search cannot serve the dataset, and
    /// [`DbscanError::Distance`] when the metric rejects a pair of points.
    pub fn run(&self, dataset: &Dataset) -> Result<ClusteringResult> {
        let items = dataset.len();
        self.run_with_len(dataset, items)
    }

    #[instrument(
        name = "core.run",
        err,
        skip(self, dataset),
        fields(
            dataset = %dataset.name(),
            items = items,
            eps = self.eps,
            min_samples = %self.min_samples,
            bound = ?self.bound,
            search = ?self.search,
            metric = %self.metric.name(),
        ),
    )]
    fn run_with_len(&self, dataset: &Dataset, items: usize) -> Result<ClusteringResult> {
        if items == 0 {
            warn!(dataset = dataset.name(), "dataset is empty, returning error");
        }
        let steps = self.steps(dataset)?;
        let result = steps.finish()?;
        info!(
            clusters = result.cluster_count(),
            noise = result.noise_count(),
            "clustering completed"
        );
        Ok(result)
    }

    /// Prepares a step-wise run over `dataset`.
    ///
    /// Nothing is labelled until the returned iterator is advanced.
    ///
    /// # Errors
    /// Returns the same configuration errors as [`Dbscan::run`]; per-point
    /// failures surface from the iterator instead.
    pub fn steps<'a>(&'a self, dataset: &'a Dataset) -> Result<Steps<'a, M>> {
        if dataset.is_empty() {
            return Err(DbscanError::EmptyDataset {
                dataset: dataset.shared_name(),
            });
        }
        let query = NeighbourhoodQuery::new(
            dataset,
            &self.metric,
            self.eps,
            self.bound,
            self.search,
        )?;
        Ok(Steps::new(query, dataset.len(), self.min_samples.get()))
    }
}

/// Clusters `points` with Euclidean distance, the strict bound and brute-force
/// search, returning `-1` for noise and `0..k-1` for cluster members.
///
/// # Errors
/// Returns [`DbscanError::InvalidEps`] or [`DbscanError::InvalidMinSamples`]
/// for bad parameters, [`DbscanError::Dataset`] when the rows are not a valid
/// dataset and [`DbscanError::EmptyDataset`] when `points` is empty.
///
/// # Examples
/// ```
/// let labels = densa_core::cluster(&[[0.0, 0.0], [0.1, 0.0], [3.0, 3.0]], 0.5, 2)?;
/// assert_eq!(labels, vec![0, 0, -1]);
/// # Ok::<(), densa_core::DbscanError>(())
/// ```
pub fn cluster<R: AsRef<[f64]>>(points: &[R], eps: f64, min_samples: usize) -> Result<Vec<i64>> {
    let dbscan = DbscanBuilder::new()
        .with_eps(eps)
        .with_min_samples(min_samples)
        .with_bound(EpsBound::Strict)
        .with_neighbour_search(NeighbourSearch::BruteForce)
        .build()?;

    let name: Arc<str> = Arc::from("points");
    let rows: Vec<&[f64]> = points.iter().map(AsRef::as_ref).collect();
    let dataset = Dataset::try_new(Arc::clone(&name), rows)
        .map_err(|error| DbscanError::Dataset { dataset: name, error })?;
    Ok(dbscan.run(&dataset)?.labels())
}
