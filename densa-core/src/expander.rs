//! Density-reachability expansion of a single cluster.

use tracing::debug;

use crate::{
    Result,
    distance::Metric,
    label::{Label, LabelStore},
    neighbourhood::NeighbourhoodQuery,
    result::ClusterId,
};

/// Counters describing the growth of one cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpansionStats {
    /// Points labelled into the cluster, seed included.
    pub members: usize,
    /// Members that were previously labelled noise.
    pub border_reclaimed: usize,
    /// Neighbourhood queries issued, excluding the seed's.
    pub queries: usize,
    /// Final length of the worklist, duplicates included.
    pub worklist_len: usize,
}

/// Grows clusters from core seeds over an append-only worklist.
#[derive(Debug)]
pub(crate) struct ClusterExpander<'q, 'a, M> {
    query: &'q NeighbourhoodQuery<'a, M>,
    min_samples: usize,
}

impl<'q, 'a, M: Metric> ClusterExpander<'q, 'a, M> {
    pub(crate) fn new(query: &'q NeighbourhoodQuery<'a, M>, min_samples: usize) -> Self {
        Self { query, min_samples }
    }

    /// Labels every point density-reachable from `seed` with `cluster`.
    ///
    /// `seed_neighbours` must be the seed's neighbourhood and must already
    /// satisfy the core-point test. Noise points reached by the expansion
    /// join as border members without being expanded. Points held by an
    /// earlier cluster are left where they are.
    pub(crate) fn expand(
        &self,
        labels: &mut LabelStore,
        seed: usize,
        seed_neighbours: Vec<usize>,
        cluster: ClusterId,
    ) -> Result<ExpansionStats> {
        let mut stats = ExpansionStats::default();
        labels.set_cluster(seed, cluster)?;
        stats.members = 1;

        let mut worklist = seed_neighbours;
        let mut cursor = 0;
        while let Some(&point) = worklist.get(cursor) {
            cursor += 1;
            match labels.get(point) {
                Some(Label::Assigned(_)) => {}
                Some(Label::Noise) => {
                    labels.set_cluster(point, cluster)?;
                    stats.members += 1;
                    stats.border_reclaimed += 1;
                }
                Some(Label::Unvisited) | None => {
                    labels.set_cluster(point, cluster)?;
                    stats.members += 1;
                    let neighbours = self.query.neighbours(point)?;
                    stats.queries += 1;
                    if neighbours.len() >= self.min_samples {
                        worklist.extend(neighbours);
                    }
                }
            }
        }
        stats.worklist_len = worklist.len();

        debug!(
            cluster = cluster.get(),
            seed,
            members = stats.members,
            border_reclaimed = stats.border_reclaimed,
            queries = stats.queries,
            worklist_len = stats.worklist_len,
            "cluster expanded"
        );
        Ok(stats)
    }
}
