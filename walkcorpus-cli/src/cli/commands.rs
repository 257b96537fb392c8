//! Command implementations and argument parsing for the walkcorpus CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{Span, field, info, instrument};
use walkcorpus_core::{
    CooccurrenceMatrix, CorpusBuilder, CorpusError, CorpusStats, ExecutionStrategy,
};
use walkcorpus_providers_edges::{EdgeListProvider, EdgeListProviderError};
use walkcorpus_providers_scores::{ScoredMatrixProvider, ScoredMatrixProviderError};

use super::byte_size::parse_byte_size;

const DEFAULT_WALK_LENGTH: usize = 80;
const DEFAULT_NUMBER_OF_WALKS: usize = 10;
const DEFAULT_WINDOW_SIZE: usize = 3;
const DEFAULT_PRUNING_THRESHOLD: u64 = 10;
const DEFAULT_SEED: u64 = 0x5EED_CAFE;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "walkcorpus",
    about = "Build sparse co-occurrence matrices from random walks over a graph."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Build a co-occurrence matrix from a CSV edge list.
    Build(BuildCommand),
    /// Load a pre-scored `(row, col, score)` CSV as a matrix.
    Scores(ScoresArgs),
}

/// Options accepted by the `build` command.
#[derive(Debug, Args, Clone)]
pub struct BuildCommand {
    /// Path to a CSV edge list with a header row and two integer columns.
    pub path: PathBuf,

    /// Maximum number of nodes per walk.
    #[arg(long, default_value_t = DEFAULT_WALK_LENGTH)]
    pub walk_length: usize,

    /// Number of walks started from every node.
    #[arg(long, default_value_t = DEFAULT_NUMBER_OF_WALKS)]
    pub number_of_walks: usize,

    /// Largest positional offset paired within a walk.
    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window_size: usize,

    /// Pairs seen this many times or fewer are dropped.
    #[arg(long, default_value_t = DEFAULT_PRUNING_THRESHOLD)]
    pub pruning_threshold: u64,

    /// Seed for walk generation.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Scheduling strategy for walk generation and pair counting.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,

    /// Reject the run when its estimated peak memory exceeds this size.
    ///
    /// Accepts plain bytes or binary suffixes such as `512MiB` or `2G`.
    #[arg(long, value_parser = parse_byte_size)]
    pub max_bytes: Option<u64>,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Options accepted by the `scores` command.
#[derive(Debug, Args, Clone)]
pub struct ScoresArgs {
    /// Path to a CSV with a header row and `row,col,score` columns.
    pub path: PathBuf,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Command-line spelling of [`ExecutionStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Let the library pick a schedule.
    Auto,
    /// Run on the calling thread.
    Sequential,
    /// Run on Rayon workers.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while opening an input.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Edge-list ingestion failed.
    #[error(transparent)]
    Edges(#[from] EdgeListProviderError),
    /// Pre-scored ingestion failed.
    #[error(transparent)]
    Scores(#[from] ScoredMatrixProviderError),
    /// Corpus construction failed.
    #[error(transparent)]
    Core(#[from] CorpusError),
}

impl CliError {
    /// Returns the stable code of the underlying library error, if it has one.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Core(err) | Self::Scores(ScoredMatrixProviderError::Matrix(err)) => {
                Some(err.code().as_str())
            }
            Self::Edges(EdgeListProviderError::Graph(err)) => Some(err.code().as_str()),
            _ => None,
        }
    }

    /// Returns the graph-level code when the failure originated in graph
    /// construction.
    #[must_use]
    pub fn graph_code(&self) -> Option<&'static str> {
        match self {
            Self::Core(err) => err.graph_code().map(|code| code.as_str()),
            Self::Edges(EdgeListProviderError::Graph(err)) => Some(err.code().as_str()),
            _ => None,
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name reported by the data source.
    pub data_source: String,
    /// `(label, value)` rows rendered as the parameter table.
    pub parameters: Vec<(String, String)>,
    /// Matrix produced by the command.
    pub matrix: CooccurrenceMatrix,
    /// Run counters, present for `build`.
    pub stats: Option<CorpusStats>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading or execution fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use walkcorpus_cli::cli::{Cli, Command, ScoresArgs, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "row,col,score\n0,1,2.5\n1,0,2.5\n")?;
/// let cli = Cli {
///     command: Command::Scores(ScoresArgs {
///         path: file.path().to_path_buf(),
///         name: Some("demo".into()),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.matrix.shape(), (2, 2));
/// assert_eq!(summary.data_source, "demo");
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Build(build) => {
            span.record("command", field::display("build"));
            run_build(build)
        }
        Command::Scores(args) => {
            span.record("command", field::display("scores"));
            run_scores(args)
        }
    }
}

#[instrument(
    name = "cli.build",
    err,
    skip(command),
    fields(
        path = field::Empty,
        walk_length = command.walk_length,
        number_of_walks = command.number_of_walks,
        window_size = command.window_size,
        pruning_threshold = command.pruning_threshold,
        strategy = ?command.strategy,
    ),
)]
pub(super) fn run_build(command: BuildCommand) -> Result<ExecutionSummary, CliError> {
    Span::current().record("path", field::display(command.path.display()));
    let pipeline = CorpusBuilder::new()
        .with_walk_length(command.walk_length)
        .with_number_of_walks(command.number_of_walks)
        .with_window_size(command.window_size)
        .with_pruning_threshold(command.pruning_threshold)
        .with_seed(command.seed)
        .with_execution_strategy(command.strategy.into())
        .with_max_bytes(command.max_bytes)
        .build()?;

    let chosen_name = derive_data_source_name(&command.path, command.name.as_deref());
    let reader = open_reader(&command.path)?;
    let provider = EdgeListProvider::try_from_reader(chosen_name, reader)?;
    let report = pipeline.run(provider.graph())?;
    let stats = report.stats();

    info!(
        data_source = provider.name(),
        nnz = report.matrix().nnz(),
        "build completed"
    );
    Ok(ExecutionSummary {
        data_source: provider.name().to_owned(),
        parameters: build_parameters(&command),
        matrix: report.into_matrix(),
        stats: Some(stats),
    })
}

#[instrument(name = "cli.scores", err, skip(args), fields(path = field::Empty))]
pub(super) fn run_scores(args: ScoresArgs) -> Result<ExecutionSummary, CliError> {
    let ScoresArgs { path, name } = args;
    Span::current().record("path", field::display(path.display()));
    let chosen_name = derive_data_source_name(&path, name.as_deref());
    let reader = open_reader(&path)?;
    let provider = ScoredMatrixProvider::try_from_reader(chosen_name, reader)?;
    let parameters = vec![
        ("Path".to_owned(), path.display().to_string()),
        ("Score rows".to_owned(), provider.score_rows().to_string()),
    ];
    info!(
        data_source = provider.name(),
        nnz = provider.matrix().nnz(),
        "scores loaded"
    );
    Ok(ExecutionSummary {
        data_source: provider.name().to_owned(),
        parameters,
        matrix: provider.into_matrix(),
        stats: None,
    })
}

fn build_parameters(command: &BuildCommand) -> Vec<(String, String)> {
    let strategy = match command.strategy {
        StrategyArg::Auto => "auto",
        StrategyArg::Sequential => "sequential",
        StrategyArg::Parallel => "parallel",
    };
    let max_bytes = command
        .max_bytes
        .map_or_else(|| "unlimited".to_owned(), walkcorpus_core::format_bytes);
    [
        ("Walk length", command.walk_length.to_string()),
        ("Number of walks", command.number_of_walks.to_string()),
        ("Window size", command.window_size.to_string()),
        ("Pruning threshold", command.pruning_threshold.to_string()),
        ("Seed", command.seed.to_string()),
        ("Strategy", strategy.to_owned()),
        ("Max bytes", max_bytes),
    ]
    .into_iter()
    .map(|(label, value)| (label.to_owned(), value))
    .collect()
}

#[instrument(name = "cli.open_reader", err, fields(path = field::Empty))]
pub(super) fn open_reader(path: &Path) -> Result<BufReader<File>, CliError> {
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

/// Renders `summary` to `writer` as a parameter table followed by the
/// matrix entries.
///
/// Each stored entry becomes one `row\tcol\tvalue` line in row-major order.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use walkcorpus_cli::cli::{ExecutionSummary, render_summary};
/// # use walkcorpus_core::CooccurrenceMatrix;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     parameters: vec![("Window size".into(), "3".into())],
///     matrix: CooccurrenceMatrix::from_triplets((2, 2), [(0, 1, 4.0), (1, 0, 4.0)])?,
///     stats: None,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.contains("Window size | 3"));
/// assert!(text.ends_with("0\t1\t4\n1\t0\t4\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    const KEY_HEADER: &str = "Parameter";
    const VALUE_HEADER: &str = "Value";

    let key_width = summary
        .parameters
        .iter()
        .map(|(key, _)| key.len())
        .chain([KEY_HEADER.len()])
        .max()
        .unwrap_or_default();
    let value_width = summary
        .parameters
        .iter()
        .map(|(_, value)| value.len())
        .chain([VALUE_HEADER.len()])
        .max()
        .unwrap_or_default();

    writeln!(writer, "{KEY_HEADER:<key_width$} | {VALUE_HEADER}")?;
    writeln!(
        writer,
        "{}-+-{}",
        "-".repeat(key_width),
        "-".repeat(value_width)
    )?;
    for (key, value) in &summary.parameters {
        writeln!(writer, "{key:<key_width$} | {value}")?;
    }
    writeln!(writer)?;

    let (rows, cols) = summary.matrix.shape();
    writeln!(writer, "data source: {}", summary.data_source)?;
    writeln!(writer, "shape: {rows}x{cols}")?;
    writeln!(writer, "non-zero entries: {}", summary.matrix.nnz())?;
    for (row, col, value) in summary.matrix.iter() {
        writeln!(writer, "{row}\t{col}\t{value}")?;
    }
    Ok(())
}
