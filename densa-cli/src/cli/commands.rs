//! Command implementations and argument parsing for the densa CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use densa_core::{
    ClusteringResult, Cosine, Dataset, Dbscan, DbscanBuilder, DbscanError, EpsBound, Manhattan,
    NeighbourSearch,
};
use densa_providers_dense::{DenseMatrixProvider, DenseMatrixProviderError};
use densa_providers_text::{Delimiter, TextProvider, TextProviderError};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_EPS: f64 = 0.5;
const DEFAULT_MIN_SAMPLES: usize = 5;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "densa", about = "Density-based clustering of point datasets.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Cluster a dataset and print one label per point.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Neighbourhood radius.
    #[arg(long, default_value_t = DEFAULT_EPS)]
    pub eps: f64,

    /// Neighbourhood size, the point itself included, that makes a point core.
    #[arg(
        long = "min-samples",
        default_value_t = DEFAULT_MIN_SAMPLES,
        value_parser = clap::value_parser!(usize),
    )]
    pub min_samples: usize,

    /// Whether a distance exactly equal to eps counts as a neighbour.
    #[arg(long, value_enum, default_value_t = BoundArg::Strict)]
    pub bound: BoundArg,

    /// Neighbour search strategy.
    #[arg(long, value_enum, default_value_t = SearchArg::Auto)]
    pub search: SearchArg,

    /// Distance metric.
    #[arg(long, value_enum, default_value_t = MetricArg::Euclidean)]
    pub metric: MetricArg,

    /// Data source configuration.
    #[command(subcommand)]
    pub source: RunSource,
}

/// Command-line spelling of [`EpsBound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BoundArg {
    /// Neighbours lie strictly closer than eps.
    Strict,
    /// Neighbours lie at most eps away.
    Inclusive,
}

impl From<BoundArg> for EpsBound {
    fn from(value: BoundArg) -> Self {
        match value {
            BoundArg::Strict => Self::Strict,
            BoundArg::Inclusive => Self::Inclusive,
        }
    }
}

/// Command-line spelling of [`NeighbourSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchArg {
    /// Pick the grid when the metric and dataset allow it.
    Auto,
    /// Compare every pair of points.
    BruteForce,
    /// Use the uniform grid index.
    Grid,
}

impl From<SearchArg> for NeighbourSearch {
    fn from(value: SearchArg) -> Self {
        match value {
            SearchArg::Auto => Self::Auto,
            SearchArg::BruteForce => Self::BruteForce,
            SearchArg::Grid => Self::Grid,
        }
    }
}

/// Supported distance metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    /// Straight-line distance.
    Euclidean,
    /// Sum of absolute coordinate differences.
    Manhattan,
    /// One minus cosine similarity.
    Cosine,
}

impl MetricArg {
    const fn label(self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Manhattan => "manhattan",
            Self::Cosine => "cosine",
        }
    }
}

/// Input data sources.
#[derive(Debug, Subcommand, Clone)]
pub enum RunSource {
    /// Load a Parquet file containing a `FixedSizeList<Float32|Float64, D>` column.
    Parquet(ParquetArgs),
    /// Load a UTF-8 text file with one delimited point per line.
    Text(TextArgs),
}

/// Parquet ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct ParquetArgs {
    /// Path to the Parquet file containing points.
    pub path: PathBuf,

    /// Column containing `FixedSizeList<Float32|Float64, D>` rows.
    #[arg(long)]
    pub column: String,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Text ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct TextArgs {
    /// Path to a UTF-8 text file with one point per line.
    pub path: PathBuf,

    /// Coordinate separator; whitespace when omitted.
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading an input source.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Dense matrix ingestion failed.
    #[error(transparent)]
    Dense(#[from] DenseMatrixProviderError),
    /// Text ingestion failed.
    #[error(transparent)]
    Text(#[from] TextProviderError),
    /// Clustering failed.
    #[error(transparent)]
    Core(#[from] DbscanError),
}

impl CliError {
    /// Stable code of the wrapped library error, if any.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Io { .. } => None,
            Self::Dense(err) => Some(err.code().as_str()),
            Self::Text(err) => Some(err.code().as_str()),
            Self::Core(err) => Some(err.code().as_str()),
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name of the loaded dataset.
    pub data_source: String,
    /// Cluster assignments for every point.
    pub result: ClusteringResult,
}

/// A validated clusterer for whichever metric was requested.
enum Clusterer {
    Euclidean(Dbscan),
    Manhattan(Dbscan<Manhattan>),
    Cosine(Dbscan<Cosine>),
}

impl Clusterer {
    fn build(command: &RunCommand) -> Result<Self, DbscanError> {
        let builder = DbscanBuilder::new()
            .with_eps(command.eps)
            .with_min_samples(command.min_samples)
            .with_bound(command.bound.into())
            .with_neighbour_search(command.search.into());
        Ok(match command.metric {
            MetricArg::Euclidean => Self::Euclidean(builder.build()?),
            MetricArg::Manhattan => Self::Manhattan(builder.with_metric(Manhattan).build()?),
            MetricArg::Cosine => Self::Cosine(builder.with_metric(Cosine).build()?),
        })
    }

    fn run(&self, dataset: &Dataset) -> Result<ClusteringResult, DbscanError> {
        match self {
            Self::Euclidean(dbscan) => dbscan.run(dataset),
            Self::Manhattan(dbscan) => dbscan.run(dataset),
            Self::Cosine(dbscan) => dbscan.run(dataset),
        }
    }
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading or clustering fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use clap::Parser;
/// # use densa_cli::cli::{Cli, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0 0\n0 0.1\n4 4\n")?;
/// let path = file.path().to_string_lossy().into_owned();
/// let cli = Cli::try_parse_from([
///     "densa", "run", "--eps", "0.5", "--min-samples", "2", "text", path.as_str(),
/// ])?;
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.result.labels(), vec![0, 0, -1]);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(
        eps = field::Empty,
        min_samples = field::Empty,
        metric = field::Empty,
        source = field::Empty,
    ),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let clusterer = Clusterer::build(&command)?;

    let span = Span::current();
    span.record("eps", command.eps);
    span.record("min_samples", field::display(command.min_samples));
    span.record("metric", field::display(command.metric.label()));

    let dataset = match command.source {
        RunSource::Parquet(args) => {
            span.record("source", field::display("parquet"));
            load_parquet(args)?
        }
        RunSource::Text(args) => {
            span.record("source", field::display("text"));
            load_text(args)?
        }
    };

    let result = clusterer.run(&dataset)?;
    info!(
        data_source = dataset.name(),
        clusters = result.cluster_count(),
        noise = result.noise_count(),
        "command completed"
    );
    Ok(ExecutionSummary {
        data_source: dataset.name().to_owned(),
        result,
    })
}

#[instrument(
    name = "cli.load_parquet",
    err,
    skip(args),
    fields(path = field::Empty, column = field::Empty, override_name = field::Empty),
)]
pub(super) fn load_parquet(args: ParquetArgs) -> Result<Dataset, CliError> {
    let ParquetArgs { path, column, name } = args;
    let span = Span::current();
    span.record("path", field::display(path.display()));
    span.record("column", field::display(&column));
    span.record(
        "override_name",
        field::display(name.as_deref().unwrap_or("<derived>")),
    );
    let chosen_name = derive_data_source_name(&path, name.as_deref());
    let provider = DenseMatrixProvider::try_from_parquet_path(chosen_name, &path, &column)?;
    info!(
        data_source = provider.name(),
        rows = provider.len(),
        dimension = provider.dimension(),
        "parquet points loaded"
    );
    Ok(provider.into_dataset()?)
}

#[instrument(
    name = "cli.load_text",
    err,
    skip(args),
    fields(path = field::Empty, delimiter = field::Empty, override_name = field::Empty),
)]
pub(super) fn load_text(args: TextArgs) -> Result<Dataset, CliError> {
    let TextArgs {
        path,
        delimiter,
        name,
    } = args;
    let span = Span::current();
    span.record("path", field::display(path.display()));
    let delimiter = delimiter.map_or(Delimiter::Whitespace, Delimiter::Char);
    span.record("delimiter", field::debug(delimiter));
    span.record(
        "override_name",
        field::display(name.as_deref().unwrap_or("<derived>")),
    );
    let chosen_name = derive_data_source_name(&path, name.as_deref());
    let reader = open_text_reader(&path)?;
    let provider = TextProvider::try_from_reader(chosen_name, reader, delimiter)?;
    info!(
        data_source = provider.name(),
        rows = provider.len(),
        dimension = provider.dimension(),
        "text points loaded"
    );
    Ok(provider.into_dataset()?)
}

#[instrument(name = "cli.open_text_reader", err, fields(path = field::Empty))]
pub(super) fn open_text_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "data_source".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` as a header followed by `index<TAB>label`
/// lines, with `-1` marking noise.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use densa_cli::cli::{ExecutionSummary, render_summary};
/// # use densa_core::{Dataset, DbscanBuilder};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dataset = Dataset::try_new("demo", vec![[0.0], [0.1], [9.0]])?;
/// let result = DbscanBuilder::new()
///     .with_eps(0.5)
///     .with_min_samples(2)
///     .build()?
///     .run(&dataset)?;
/// let summary = ExecutionSummary { data_source: "demo".into(), result };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "data source: demo\nclusters: 1\nnoise: 1\n0\t0\n1\t0\n2\t-1\n"
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "data source: {}", summary.data_source)?;
    writeln!(writer, "clusters: {}", summary.result.cluster_count())?;
    writeln!(writer, "noise: {}", summary.result.noise_count())?;
    for (index, label) in summary.result.labels().into_iter().enumerate() {
        writeln!(writer, "{index}\t{label}")?;
    }
    Ok(())
}
