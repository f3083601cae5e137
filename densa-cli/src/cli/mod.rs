//! Command-line interface orchestration for densa.
//!
//! The `run` command loads points from a Parquet fixed-size list column or a
//! delimited text file, clusters them and reports one label per point.

mod commands;

pub use commands::{
    BoundArg, Cli, CliError, Command, ExecutionSummary, MetricArg, ParquetArgs, RunCommand,
    RunSource, SearchArg, TextArgs, render_summary, run_cli,
};

#[cfg(test)]
mod test_fixtures;
#[cfg(test)]
mod test_helpers;
