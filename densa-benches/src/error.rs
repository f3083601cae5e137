//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of `.expect()`.

use crate::source::SyntheticError;
use densa_core::DbscanError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic data generation failed.
    #[error("synthetic source generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Clustering configuration or execution failed.
    #[error("clustering failed: {0}")]
    Dbscan(#[from] DbscanError),
}
