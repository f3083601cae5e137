//! Result types for clustering operations.
//!
//! Provides the per-point assignments produced by a run and validation of the
//! cluster identifier constraints.

use std::collections::HashSet;

use thiserror::Error;

/// Identifier assigned to a cluster, in discovery order starting at zero.
///
/// # Examples
/// ```
/// use densa_core::ClusterId;
///
/// let id = ClusterId::new(4);
/// assert_eq!(id.get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(u64);

impl ClusterId {
    /// Creates a new cluster identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }

    pub(crate) const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Terminal classification of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Assignment {
    /// Neither a core point nor reachable from one.
    Noise,
    /// Member of the given cluster.
    Cluster(ClusterId),
}

impl Assignment {
    /// Sentinel encoding: `-1` for noise, the cluster id otherwise.
    ///
    /// # Examples
    /// ```
    /// use densa_core::{Assignment, ClusterId};
    ///
    /// assert_eq!(Assignment::Noise.as_sentinel(), -1);
    /// assert_eq!(Assignment::Cluster(ClusterId::new(2)).as_sentinel(), 2);
    /// ```
    #[must_use]
    pub fn as_sentinel(self) -> i64 {
        match self {
            Self::Noise => -1,
            Self::Cluster(id) => i64::try_from(id.get()).unwrap_or(i64::MAX),
        }
    }

    /// Returns the cluster, or `None` for noise.
    #[must_use]
    pub fn cluster(self) -> Option<ClusterId> {
        match self {
            Self::Noise => None,
            Self::Cluster(id) => Some(id),
        }
    }
}

/// Error returned when cluster identifiers are not contiguous starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NonContiguousClusterIds {
    /// Clusters exist but none of them is cluster `0`.
    #[error("cluster identifiers must include 0")]
    MissingZero,
    /// The assignments skip identifiers.
    #[error("cluster identifiers must be contiguous without gaps")]
    Gap,
    /// The assignments require identifiers beyond the host pointer width.
    #[error("cluster identifiers exceed or reach the host pointer-width limit")]
    Overflow,
    /// The seed list disagrees with the clusters present.
    #[error("expected {expected} seeds but {actual} were given")]
    SeedCount {
        /// Number of clusters found in the assignments.
        expected: usize,
        /// Number of seeds supplied.
        actual: usize,
    },
}

/// Represents the output of a [`crate::Dbscan::run`] invocation.
///
/// # Examples
/// ```
/// use densa_core::{Assignment, ClusterId, ClusteringResult};
///
/// let result = ClusteringResult::try_new(
///     vec![
///         Assignment::Cluster(ClusterId::new(0)),
///         Assignment::Noise,
///         Assignment::Cluster(ClusterId::new(0)),
///     ],
///     vec![0],
/// )?;
/// assert_eq!(result.cluster_count(), 1);
/// assert_eq!(result.noise_count(), 1);
/// assert_eq!(result.labels(), vec![0, -1, 0]);
/// # Ok::<(), densa_core::NonContiguousClusterIds>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusteringResult {
    assignments: Vec<Assignment>,
    seeds: Vec<usize>,
    cluster_count: usize,
}

impl ClusteringResult {
    /// Attempts to build a result from assignments and per-cluster seeds.
    ///
    /// Cluster identifiers must be contiguous starting at zero and `seeds`
    /// must name one seed point per cluster. An empty `assignments` vector is
    /// accepted and yields `cluster_count == 0`.
    ///
    /// # Errors
    /// Returns [`NonContiguousClusterIds::MissingZero`] when clusters exist
    /// without cluster `0`, [`NonContiguousClusterIds::Gap`] when identifiers
    /// skip values, [`NonContiguousClusterIds::Overflow`] when identifiers
    /// exceed the host pointer width, and
    /// [`NonContiguousClusterIds::SeedCount`] when the seed count is wrong.
    pub fn try_new(
        assignments: Vec<Assignment>,
        seeds: Vec<usize>,
    ) -> Result<Self, NonContiguousClusterIds> {
        let mut seen = HashSet::new();
        let mut max_id = None::<u64>;

        for id in assignments.iter().filter_map(|assignment| assignment.cluster()) {
            let value = id.get();
            if value >= usize::MAX as u64 {
                return Err(NonContiguousClusterIds::Overflow);
            }
            seen.insert(value);
            max_id = Some(max_id.map_or(value, |current| current.max(value)));
        }

        if let Some(max_id) = max_id {
            if !seen.contains(&0) {
                return Err(NonContiguousClusterIds::MissingZero);
            }
            let expected =
                usize::try_from(max_id + 1).map_err(|_| NonContiguousClusterIds::Overflow)?;
            if seen.len() != expected {
                return Err(NonContiguousClusterIds::Gap);
            }
        }

        if seeds.len() != seen.len() {
            return Err(NonContiguousClusterIds::SeedCount {
                expected: seen.len(),
                actual: seeds.len(),
            });
        }

        Ok(Self {
            assignments,
            seeds,
            cluster_count: seen.len(),
        })
    }

    /// Returns the assignments in dataset order.
    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Sentinel labels in dataset order: `-1` for noise, `0..k-1` otherwise.
    #[must_use]
    pub fn labels(&self) -> Vec<i64> {
        self.assignments
            .iter()
            .map(|assignment| assignment.as_sentinel())
            .collect()
    }

    /// Number of distinct clusters discovered.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Number of points classified as noise.
    #[must_use]
    pub fn noise_count(&self) -> usize {
        self.assignments
            .iter()
            .filter(|assignment| matches!(assignment, Assignment::Noise))
            .count()
    }

    /// Seed point of each cluster, indexed by cluster id.
    ///
    /// Seeds are strictly increasing because the engine starts clusters in
    /// dataset order.
    #[must_use]
    pub fn seeds(&self) -> &[usize] {
        &self.seeds
    }

    /// Indices of the points assigned to `cluster`, ascending.
    #[must_use]
    pub fn members(&self, cluster: ClusterId) -> Vec<usize> {
        self.assignments
            .iter()
            .enumerate()
            .filter(|(_, assignment)| **assignment == Assignment::Cluster(cluster))
            .map(|(index, _)| index)
            .collect()
    }
}
