//! Fixture types shared by the clustering property suites.

use test_strategy::Arbitrary;

use crate::{Dataset, EpsBound};

/// Shape of the generated point cloud.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum PointLayout {
    /// Points sampled uniformly in a box a few radii wide.
    #[weight(2)]
    Uniform,
    /// Tight blobs around random centres plus scattered outliers.
    #[weight(3)]
    Blobs,
    /// Integer lattice scaled by `eps`, so many pairs sit exactly on the
    /// radius.
    #[weight(2)]
    Lattice,
    /// Uniform points where some rows are exact copies of earlier ones.
    #[weight(1)]
    Duplicates,
}

/// Dataset and parameters for one property case.
#[derive(Clone, Debug)]
pub(super) struct DbscanFixture {
    pub layout: PointLayout,
    pub dataset: Dataset,
    pub eps: f64,
    pub min_samples: usize,
    pub bound: EpsBound,
}
