//! Densa core library: density-based clustering over point datasets.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod dataset;
mod dbscan;
pub mod distance;
mod engine;
mod error;
mod expander;
mod label;
mod neighbourhood;
#[cfg(test)]
mod property;
mod result;
#[cfg(test)]
mod test_utils;

#[cfg(feature = "grid")]
#[cfg_attr(docsrs, doc(cfg(feature = "grid")))]
pub use crate::neighbourhood::{GRID_MAX_DIMENSION, GRID_MIN_ITEMS};
pub use crate::{
    builder::DbscanBuilder,
    dataset::Dataset,
    dbscan::{Dbscan, cluster},
    distance::{Cosine, DistanceError, Euclidean, Manhattan, Metric},
    engine::{Step, StepOutcome, Steps},
    error::{DatasetError, DatasetErrorCode, DbscanError, DbscanErrorCode, Result},
    expander::ExpansionStats,
    label::{Label, LabelStore},
    neighbourhood::{EpsBound, NeighbourSearch, NeighbourhoodQuery},
    result::{Assignment, ClusterId, ClusteringResult, NonContiguousClusterIds},
};
