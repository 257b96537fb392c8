//! Tests for the `--max-bytes` memory guard and `parse_byte_size` parser.

use super::byte_size::parse_byte_size;
use super::commands::run_build;
use super::{Cli, CliError, Command};

use clap::Parser;
use rstest::rstest;
use walkcorpus_core::CorpusError;

use super::test_helpers::{create_csv_file, run_build_expecting_error, small_build, temp_dir};

type TestResult = Result<(), Box<dyn std::error::Error>>;

const TRIANGLE: &str = "source,target\n0,1\n1,2\n2,0\n";

// -- parse_byte_size: happy paths -------------------------------------------

#[rstest]
#[case::plain_bytes("1024", 1024)]
#[case::zero("0", 0)]
#[case::bare_b("64B", 64)]
#[case::padded(" 8k ", 8 * 1024)]
#[case::suffix_k_lower("100k", 100 * 1024)]
#[case::suffix_k_upper("100K", 100 * 1024)]
#[case::suffix_kb("100KB", 100 * 1024)]
#[case::suffix_kib("100KiB", 100 * 1024)]
#[case::suffix_m_lower("512m", 512 * 1024 * 1024)]
#[case::suffix_m_upper("512M", 512 * 1024 * 1024)]
#[case::suffix_mb("512MB", 512 * 1024 * 1024)]
#[case::suffix_mib("512MiB", 512 * 1024 * 1024)]
#[case::suffix_g_lower("2g", 2 * 1024 * 1024 * 1024)]
#[case::suffix_g_upper("2G", 2 * 1024 * 1024 * 1024)]
#[case::suffix_gb("2GB", 2 * 1024 * 1024 * 1024)]
#[case::suffix_gib("2GiB", 2 * 1024 * 1024 * 1024)]
#[case::suffix_t("1T", 1024_u64 * 1024 * 1024 * 1024)]
#[case::suffix_tb("1TB", 1024_u64 * 1024 * 1024 * 1024)]
#[case::suffix_tib("1TiB", 1024_u64 * 1024 * 1024 * 1024)]
fn parse_byte_size_accepts_valid_input(#[case] input: &str, #[case] expected: u64) {
    assert_eq!(
        parse_byte_size(input).expect("valid input must parse"),
        expected
    );
}

// -- parse_byte_size: unhappy paths -----------------------------------------

#[rstest]
#[case::empty("")]
#[case::only_suffix("M")]
#[case::unknown_suffix("100X")]
#[case::bare_ib("100iB")]
#[case::negative("-100")]
#[case::decimal("1.5G")]
fn parse_byte_size_rejects_invalid_input(#[case] input: &str) {
    assert!(
        parse_byte_size(input).is_err(),
        "expected `{input}` to be rejected"
    );
}

#[rstest]
fn parse_byte_size_rejects_overflow() {
    assert!(parse_byte_size("18446744073709551615T").is_err());
}

// -- CLI memory guard: integration ------------------------------------------

#[rstest]
#[case::tiny(100)]
#[case::zero(0)]
fn run_build_rejects_when_max_bytes_exceeded(#[case] limit: u64) -> TestResult {
    let dir = temp_dir();
    let path = create_csv_file(&dir, "edges.csv", TRIANGLE)?;
    let mut command = small_build(path);
    command.max_bytes = Some(limit);

    let err = run_build_expecting_error(command, "limit must be exceeded");
    assert!(
        matches!(
            err,
            CliError::Core(CorpusError::MemoryLimitExceeded { node_count: 3, .. })
        ),
        "expected MemoryLimitExceeded, got {err:?}"
    );
    assert_eq!(err.code(), Some("CORPUS_MEMORY_LIMIT_EXCEEDED"));
    Ok(())
}

#[rstest]
fn run_build_succeeds_when_max_bytes_sufficient() -> TestResult {
    let dir = temp_dir();
    let path = create_csv_file(&dir, "edges.csv", TRIANGLE)?;
    let mut command = small_build(path);
    command.max_bytes = Some(1_073_741_824);

    let summary = run_build(command)?;
    assert_eq!(summary.matrix.shape(), (3, 3));
    assert!(
        summary
            .parameters
            .iter()
            .any(|(key, value)| key == "Max bytes" && value == "1.0 GiB")
    );
    Ok(())
}

#[rstest]
fn clap_parses_max_bytes_flag() {
    let args = ["walkcorpus", "build", "edges.csv", "--max-bytes", "2G"];
    let cli = Cli::try_parse_from(args).expect("valid args must parse");
    match cli.command {
        Command::Build(cmd) => assert_eq!(cmd.max_bytes, Some(2 * 1024 * 1024 * 1024)),
        Command::Scores(_) => panic!("expected the build command"),
    }
}

#[rstest]
fn clap_omits_max_bytes_when_absent() {
    let args = ["walkcorpus", "build", "edges.csv"];
    let cli = Cli::try_parse_from(args).expect("valid args must parse");
    match cli.command {
        Command::Build(cmd) => assert_eq!(cmd.max_bytes, None),
        Command::Scores(_) => panic!("expected the build command"),
    }
}

#[rstest]
fn clap_rejects_malformed_max_bytes() {
    let args = ["walkcorpus", "build", "edges.csv", "--max-bytes", "1.5G"];
    assert!(Cli::try_parse_from(args).is_err());
}
