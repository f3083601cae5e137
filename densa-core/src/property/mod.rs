//! Property-based tests for the clustering engine.
//!
//! Compares the engine against an independent adjacency-matrix oracle,
//! checks the structural guarantees of every result (totality, contiguous
//! identifiers, core closure) and verifies that the grid index never changes
//! an outcome.

mod invariants;
mod oracle;
mod strategies;
mod types;
