//! Small helpers shared across CLI tests.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::TempDir;

use super::commands::run_command;
use super::{BoundArg, CliError, MetricArg, RunCommand, RunSource, SearchArg, TextArgs};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_text_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// A `run` command with the CLI defaults except for `eps` and `min_samples`.
pub(super) fn run_command_for(source: RunSource, eps: f64, min_samples: usize) -> RunCommand {
    RunCommand {
        eps,
        min_samples,
        bound: BoundArg::Strict,
        search: SearchArg::Auto,
        metric: MetricArg::Euclidean,
        source,
    }
}

pub(super) fn text_source(path: PathBuf) -> RunSource {
    RunSource::Text(TextArgs {
        path,
        delimiter: None,
        name: None,
    })
}

pub(super) fn run_command_expecting_error(cmd: RunCommand, panic_msg: &str) -> CliError {
    match run_command(cmd) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
