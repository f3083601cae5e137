//! Benchmark support crate for densa.
//!
//! Provides seeded synthetic datasets and parameter types used by the
//! Criterion benchmarks comparing neighbour search strategies.

pub mod error;
pub mod params;
pub mod source;
