//! Shared test utilities used across densa crates.

pub mod ci;
pub mod tracing;
