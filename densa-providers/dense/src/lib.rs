//! Dense point providers reading Arrow and Parquet fixed-size list columns.
//!
//! Each row of a `FixedSizeList<Float32 | Float64, D>` column becomes one
//! `D`-dimensional point of a [`densa_core::Dataset`].

mod errors;
mod ingest;
mod provider;

pub use errors::{DenseMatrixProviderError, DenseMatrixProviderErrorCode};
pub use provider::DenseMatrixProvider;

#[cfg(test)]
mod tests;
