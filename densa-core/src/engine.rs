//! Step-wise driver for a clustering run.
//!
//! [`Steps`] classifies one point per call to `next`, including the full
//! expansion of any cluster that point seeds. Labels are only mutated inside
//! `next`, so a consumer can inspect [`Steps::labels`] between steps or stop
//! early by dropping the iterator.

use std::iter::FusedIterator;

use crate::{
    Result,
    distance::Metric,
    error::DbscanError,
    expander::{ClusterExpander, ExpansionStats},
    label::{Label, LabelStore},
    neighbourhood::NeighbourhoodQuery,
    result::{Assignment, ClusterId, ClusteringResult},
};

/// What happened to a point during its step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The point was labelled by an earlier expansion and was skipped.
    AlreadyLabelled(Label),
    /// The point failed the core-point test. A later cluster may still
    /// reclaim it as a border member.
    Noise,
    /// The point seeded a new cluster, which was grown to completion.
    ClusterStarted {
        /// Identifier given to the new cluster.
        cluster: ClusterId,
        /// Growth counters for the cluster.
        stats: ExpansionStats,
    },
}

/// One classified point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Index of the point handled by this step.
    pub point: usize,
    /// Classification applied to it.
    pub outcome: StepOutcome,
}

/// Lazy, non-restartable sequence of per-point classifications.
///
/// Created by [`crate::Dbscan::steps`]. The iterator yields exactly one item
/// per dataset point unless an error occurs, after which it is fused.
///
/// # Examples
/// ```
/// use densa_core::{Dataset, DbscanBuilder, StepOutcome};
///
/// let dataset = Dataset::try_new("line", vec![[0.0], [0.1], [5.0]])?;
/// let dbscan = DbscanBuilder::new().with_eps(0.5).with_min_samples(2).build()?;
/// let mut steps = dbscan.steps(&dataset)?;
///
/// let first = steps.next().expect("three points")?;
/// assert!(matches!(first.outcome, StepOutcome::ClusterStarted { .. }));
/// assert!(steps.labels().iter().take(2).all(|label| label.cluster().is_some()));
///
/// let result = steps.finish()?;
/// assert_eq!(result.labels(), vec![0, 0, -1]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Steps<'a, M> {
    query: NeighbourhoodQuery<'a, M>,
    labels: LabelStore,
    min_samples: usize,
    cursor: usize,
    next_cluster: ClusterId,
    seeds: Vec<usize>,
    failure: Option<DbscanError>,
}

impl<'a, M: Metric> Steps<'a, M> {
    pub(crate) fn new(query: NeighbourhoodQuery<'a, M>, len: usize, min_samples: usize) -> Self {
        Self {
            query,
            labels: LabelStore::new(len),
            min_samples,
            cursor: 0,
            next_cluster: ClusterId::new(0),
            seeds: Vec::new(),
            failure: None,
        }
    }

    /// Snapshot of every label as of the last completed step.
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        self.labels.as_slice()
    }

    /// Number of clusters started so far.
    #[must_use]
    pub fn clusters_started(&self) -> usize {
        self.seeds.len()
    }

    /// Runs the remaining steps and returns the final result.
    ///
    /// # Errors
    /// Returns the first error raised by any step, including one raised
    /// before `finish` was called.
    pub fn finish(mut self) -> Result<ClusteringResult> {
        while let Some(step) = self.next() {
            step?;
        }
        if let Some(error) = self.failure {
            return Err(error);
        }

        let assignments = self
            .labels
            .into_labels()
            .into_iter()
            .enumerate()
            .map(|(point, label)| match label {
                Label::Noise => Ok(Assignment::Noise),
                Label::Assigned(cluster) => Ok(Assignment::Cluster(cluster)),
                Label::Unvisited => Err(DbscanError::Unlabelled { point }),
            })
            .collect::<Result<Vec<_>>>()?;
        ClusteringResult::try_new(assignments, self.seeds)
            .map_err(|error| DbscanError::InvalidResult { error })
    }

    fn classify(&mut self, point: usize) -> Result<StepOutcome> {
        match self.labels.get(point) {
            Some(label @ (Label::Noise | Label::Assigned(_))) => {
                return Ok(StepOutcome::AlreadyLabelled(label));
            }
            Some(Label::Unvisited) | None => {}
        }

        let neighbours = self.query.neighbours(point)?;
        record_neighbourhood_size(neighbours.len());
        if neighbours.len() < self.min_samples {
            self.labels.set_noise(point)?;
            record_noise_point();
            return Ok(StepOutcome::Noise);
        }

        let cluster = self.next_cluster;
        let stats = ClusterExpander::new(&self.query, self.min_samples).expand(
            &mut self.labels,
            point,
            neighbours,
            cluster,
        )?;
        self.next_cluster = cluster.next();
        self.seeds.push(point);
        record_cluster_started();
        Ok(StepOutcome::ClusterStarted { cluster, stats })
    }
}

impl<M: Metric> Iterator for Steps<'_, M> {
    type Item = Result<Step>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failure.is_some() || self.cursor >= self.labels.len() {
            return None;
        }
        let point = self.cursor;
        self.cursor += 1;
        match self.classify(point) {
            Ok(outcome) => Some(Ok(Step { point, outcome })),
            Err(error) => {
                self.failure = Some(error.clone());
                Some(Err(error))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failure.is_some() {
            return (0, Some(0));
        }
        let remaining = self.labels.len().saturating_sub(self.cursor);
        (0, Some(remaining))
    }
}

impl<M: Metric> FusedIterator for Steps<'_, M> {}

#[cfg(feature = "metrics")]
fn record_neighbourhood_size(size: usize) {
    metrics::histogram!("dbscan_neighbourhood_size").record(size as f64);
}

#[cfg(not(feature = "metrics"))]
fn record_neighbourhood_size(_size: usize) {}

#[cfg(feature = "metrics")]
fn record_noise_point() {
    metrics::counter!("dbscan_noise_points").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_noise_point() {}

#[cfg(feature = "metrics")]
fn record_cluster_started() {
    metrics::counter!("dbscan_clusters_started").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_cluster_started() {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dataset::Dataset,
        distance::Euclidean,
        neighbourhood::{EpsBound, NeighbourSearch},
        test_utils::CountingMetric,
    };
    use rstest::{fixture, rstest};

    #[fixture]
    fn dataset() -> Dataset {
        Dataset::try_new("steps", vec![[0.0], [0.1], [0.2], [5.0], [9.0], [9.1]])
            .expect("valid rows")
    }

    fn steps<'a, M: Metric>(dataset: &'a Dataset, metric: &'a M) -> Steps<'a, M> {
        let query = NeighbourhoodQuery::new(
            dataset,
            metric,
            0.5,
            EpsBound::Strict,
            NeighbourSearch::BruteForce,
        )
        .expect("query must build");
        Steps::new(query, dataset.len(), 2)
    }

    #[rstest]
    fn yields_one_step_per_point(dataset: Dataset) {
        let outcomes: Vec<StepOutcome> = steps(&dataset, &Euclidean)
            .map(|step| step.expect("step succeeds").outcome)
            .collect();
        assert_eq!(outcomes.len(), dataset.len());
        assert!(matches!(
            outcomes[0],
            StepOutcome::ClusterStarted { cluster, .. } if cluster == ClusterId::new(0)
        ));
        assert_eq!(
            outcomes[1],
            StepOutcome::AlreadyLabelled(Label::Assigned(ClusterId::new(0)))
        );
        assert_eq!(outcomes[3], StepOutcome::Noise);
        assert!(matches!(
            outcomes[4],
            StepOutcome::ClusterStarted { cluster, .. } if cluster == ClusterId::new(1)
        ));
    }

    #[rstest]
    fn stopping_early_leaves_later_points_untouched(dataset: Dataset) {
        let mut steps = steps(&dataset, &Euclidean);
        steps.next().expect("first step").expect("step succeeds");
        assert_eq!(steps.clusters_started(), 1);
        assert_eq!(steps.labels()[3], Label::Unvisited);
        assert_eq!(steps.labels()[5], Label::Unvisited);
    }

    #[rstest]
    fn finish_drains_remaining_steps(dataset: Dataset) {
        let mut steps = steps(&dataset, &Euclidean);
        steps.next().expect("first step").expect("step succeeds");
        let result = steps.finish().expect("run completes");
        assert_eq!(result.labels(), vec![0, 0, 0, -1, 1, 1]);
        assert_eq!(result.seeds(), &[0, 4]);
    }

    #[test]
    fn errors_fuse_the_iterator() {
        let dataset = Dataset::try_new("fail", vec![[0.0], [1.0], [2.0]]).expect("valid rows");
        let metric = CountingMetric::failing_after(1);
        let mut steps = steps(&dataset, &metric);

        let err = steps
            .next()
            .expect("first step is yielded")
            .expect_err("metric fails on its second call");
        assert_eq!(err.code(), crate::DbscanErrorCode::DistanceFailure);
        assert!(steps.next().is_none());
        assert_eq!(steps.size_hint(), (0, Some(0)));
        assert_eq!(steps.finish().expect_err("failure is sticky"), err);
    }
}
