//! Small helpers shared across CLI tests.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::TempDir;

use super::commands::{BuildCommand, StrategyArg, run_build};
use super::{Cli, CliError, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_csv_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// `build` options for a short sequential run over `path`.
pub(super) fn small_build(path: PathBuf) -> BuildCommand {
    BuildCommand {
        path,
        walk_length: 5,
        number_of_walks: 20,
        window_size: 1,
        pruning_threshold: 0,
        seed: 7,
        strategy: StrategyArg::Sequential,
        max_bytes: None,
        name: None,
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn run_build_expecting_error(cmd: BuildCommand, panic_msg: &str) -> CliError {
    match run_build(cmd) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
