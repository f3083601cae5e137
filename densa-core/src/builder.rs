//! Builder utilities for configuring density clustering.
//!
//! Exposes the tuning surface of [`Dbscan`] and validates it before any
//! dataset is touched.

use std::num::NonZeroUsize;

use crate::{
    Result,
    dbscan::Dbscan,
    distance::{Euclidean, Metric},
    error::DbscanError,
    neighbourhood::{EpsBound, NeighbourSearch},
};

/// Configures and constructs [`Dbscan`] instances.
///
/// Defaults: `eps = 0.5`, `min_samples = 5`, [`EpsBound::Strict`],
/// [`NeighbourSearch::Auto`] and [`Euclidean`] distance.
///
/// # Examples
/// ```
/// use densa_core::{DbscanBuilder, EpsBound, Manhattan, NeighbourSearch};
///
/// let dbscan = DbscanBuilder::new()
///     .with_eps(0.25)
///     .with_min_samples(3)
///     .with_bound(EpsBound::Inclusive)
///     .with_neighbour_search(NeighbourSearch::BruteForce)
///     .with_metric(Manhattan)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(dbscan.eps(), 0.25);
/// assert_eq!(dbscan.min_samples().get(), 3);
/// assert_eq!(dbscan.bound(), EpsBound::Inclusive);
/// ```
#[derive(Debug, Clone)]
pub struct DbscanBuilder<M = Euclidean> {
    eps: f64,
    min_samples: usize,
    bound: EpsBound,
    search: NeighbourSearch,
    metric: M,
}

impl Default for DbscanBuilder<Euclidean> {
    fn default() -> Self {
        Self {
            eps: 0.5,
            min_samples: 5,
            bound: EpsBound::Strict,
            search: NeighbourSearch::Auto,
            metric: Euclidean,
        }
    }
}

impl DbscanBuilder<Euclidean> {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use densa_core::{DbscanBuilder, NeighbourSearch};
    ///
    /// let builder = DbscanBuilder::new();
    /// assert_eq!(builder.min_samples(), 5);
    /// assert_eq!(builder.neighbour_search(), NeighbourSearch::Auto);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: Metric> DbscanBuilder<M> {
    /// Overrides the neighbourhood radius.
    #[must_use]
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Returns the configured neighbourhood radius.
    #[must_use]
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Overrides the minimum neighbourhood size of a core point.
    ///
    /// The count includes the point itself, so `1` makes every point core.
    ///
    /// # Examples
    /// ```
    /// use densa_core::DbscanBuilder;
    ///
    /// let builder = DbscanBuilder::new().with_min_samples(10);
    /// assert_eq!(builder.min_samples(), 10);
    /// ```
    #[must_use]
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    /// Returns the configured minimum neighbourhood size.
    #[must_use]
    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Sets the comparison used for every eps check.
    #[must_use]
    pub fn with_bound(mut self, bound: EpsBound) -> Self {
        self.bound = bound;
        self
    }

    /// Returns the configured eps comparison.
    #[must_use]
    pub fn bound(&self) -> EpsBound {
        self.bound
    }

    /// Sets how neighbourhoods are computed.
    #[must_use]
    pub fn with_neighbour_search(mut self, search: NeighbourSearch) -> Self {
        self.search = search;
        self
    }

    /// Returns the configured neighbour search.
    #[must_use]
    pub fn neighbour_search(&self) -> NeighbourSearch {
        self.search
    }

    /// Replaces the distance metric.
    #[must_use]
    pub fn with_metric<N: Metric>(self, metric: N) -> DbscanBuilder<N> {
        DbscanBuilder {
            eps: self.eps,
            min_samples: self.min_samples,
            bound: self.bound,
            search: self.search,
            metric,
        }
    }

    /// Validates the configuration and constructs a [`Dbscan`] instance.
    ///
    /// # Errors
    /// Returns [`DbscanError::InvalidEps`] when `eps` is not a finite value
    /// above zero and [`DbscanError::InvalidMinSamples`] when `min_samples`
    /// is zero.
    ///
    /// # Examples
    /// ```
    /// use densa_core::{DbscanBuilder, DbscanErrorCode};
    ///
    /// let err = DbscanBuilder::new().with_eps(0.0).build().unwrap_err();
    /// assert_eq!(err.code(), DbscanErrorCode::InvalidEps);
    /// ```
    pub fn build(self) -> Result<Dbscan<M>> {
        if !(self.eps.is_finite() && self.eps > 0.0) {
            return Err(DbscanError::InvalidEps { got: self.eps });
        }
        let min_samples = NonZeroUsize::new(self.min_samples).ok_or(
            DbscanError::InvalidMinSamples {
                got: self.min_samples,
            },
        )?;

        Ok(Dbscan::new(
            self.eps,
            min_samples,
            self.bound,
            self.search,
            self.metric,
        ))
    }
}
