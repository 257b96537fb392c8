//! Command-line interface orchestration for walkcorpus.
//!
//! The `build` command turns a CSV edge list into a co-occurrence matrix via
//! random walks; `scores` loads an already-scored matrix from CSV.

mod byte_size;
mod commands;

pub use commands::{
    BuildCommand, Cli, CliError, Command, ExecutionSummary, ScoresArgs, StrategyArg,
    render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod test_memory_guard;
