//! CLI entry point for densa.
//!
//! Parses arguments, clusters the requested dataset, prints the labels to
//! stdout and maps failures to a non-zero exit status. Logging is initialised
//! first so every later step can emit diagnostics through `tracing`.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use densa_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

/// Parse CLI arguments, run the command, render the summary and flush stdout.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let cli_error = err.downcast_ref::<CliError>();
        let code = cli_error.and_then(CliError::code).map(field::display);
        let dataset_code = cli_error
            .and_then(|cli_error| match cli_error {
                CliError::Core(core) => core.dataset_code(),
                _ => None,
            })
            .map(|code| field::display(code.as_str()));

        error!(
            error = %err,
            code,
            dataset_code,
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
