//! CLI module for the gantry harness
//!
//! ## Commands
//!
//! - `run [--filter <namePattern|tag=value>] [--verbosity quiet|normal|detailed]` -
//!   execute the suite; exit code 0 iff no Failed outcome was recorded
//!
//! ## Modules
//!
//! - `reporter` - streaming console reporting at three verbosity levels
//! - `samples` - the bundled demo suite run by the `gantry` binary
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits. Embedders
//! bypass the binary entirely and call [`run_suite`] with their own
//! [`FixtureSource`].

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod reporter;
pub mod samples;

use std::fmt;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use gantry_core::{discover, run_with_observer, Filter, FixtureSource};

use self::reporter::{ConsoleReporter, Reporter};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Per-test output detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Verbosity {
    /// Final summary only.
    Quiet,
    /// One progress character per outcome, then the summary.
    #[default]
    Normal,
    /// One labelled line per outcome with timing, then the summary.
    Detailed,
}

/// The gantry test harness
#[derive(Parser, Debug)]
#[command(name = "gantry")]
#[command(version = VERSION)]
#[command(about = "An embeddable test-execution harness", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute the test suite
    Run {
        /// Restrict to fixtures/units matching a name pattern or `tag=value`
        #[arg(long, value_name = "PATTERN")]
        filter: Option<String>,

        /// Per-test output detail
        #[arg(long, value_enum, default_value_t = Verbosity::Normal)]
        verbosity: Verbosity,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Some(Command::Run { filter, verbosity }) => {
            run_suite(&samples::sample_suite(), filter.as_deref(), verbosity)
        }
        // No subcommand: run the bundled suite with defaults.
        None => run_suite(&samples::sample_suite(), None, Verbosity::Normal),
    }
}

/// Discover, execute and report a suite; the embeddable entry point.
///
/// A malformed declaration aborts before any test executes, naming the
/// offending fixture. Otherwise the run always completes and the exit code
/// reflects whether any Failed outcome was recorded.
pub fn run_suite(source: &dyn FixtureSource, filter: Option<&str>, verbosity: Verbosity) -> CliResult<ExitCode> {
    let fixtures = discover(source)
        .map_err(|e| CliError::failure(format!("discovery failed in fixture '{}': {}", e.fixture(), e)))?;

    let filter = filter.map(Filter::parse);
    let mut reporter = ConsoleReporter::new(verbosity);
    let report = run_with_observer(&fixtures, filter.as_ref(), &mut reporter);
    reporter.on_run_complete(&report);

    if report.has_failures() {
        // Summary already printed - exit nonzero with no extra message.
        Err(CliError::new("", ExitCode::FAILURE))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::try_parse_from(["gantry", "run"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Run { .. })));
    }

    #[test]
    fn test_cli_parse_run_with_filter() {
        let cli = Cli::try_parse_from(["gantry", "run", "--filter", "tag=smoke"]).unwrap();
        if let Some(Command::Run { filter, .. }) = cli.command {
            assert_eq!(filter.as_deref(), Some("tag=smoke"));
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_parse_verbosity_values() {
        for (raw, expected) in [
            ("quiet", Verbosity::Quiet),
            ("normal", Verbosity::Normal),
            ("detailed", Verbosity::Detailed),
        ] {
            let cli = Cli::try_parse_from(["gantry", "run", "--verbosity", raw]).unwrap();
            if let Some(Command::Run { verbosity, .. }) = cli.command {
                assert_eq!(verbosity, expected);
            } else {
                panic!("Expected Run command");
            }
        }
    }

    #[test]
    fn test_cli_rejects_unknown_verbosity() {
        assert!(Cli::try_parse_from(["gantry", "run", "--verbosity", "loud"]).is_err());
    }

    #[test]
    fn test_run_suite_reports_discovery_error_with_fixture_name() {
        use gantry_core::{FixtureDecl, StaticSource};

        let source = StaticSource(vec![FixtureDecl::new("hollow")]);
        let err = run_suite(&source, None, Verbosity::Quiet).unwrap_err();
        assert!(err.message.contains("hollow"));
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }

    #[test]
    fn test_run_suite_exit_codes() {
        use gantry_core::{FixtureDecl, StaticSource, TestSignal, UnitDecl};

        let passing = StaticSource(vec![
            FixtureDecl::new("green").with_unit(UnitDecl::new("ok", |_| TestSignal::Pass)),
        ]);
        assert_eq!(
            run_suite(&passing, None, Verbosity::Quiet).unwrap(),
            ExitCode::SUCCESS
        );

        let skipping = StaticSource(vec![
            FixtureDecl::new("yellow")
                .with_unit(UnitDecl::new("later", |_| TestSignal::Skip("pending".to_string()))),
        ]);
        assert_eq!(
            run_suite(&skipping, None, Verbosity::Quiet).unwrap(),
            ExitCode::SUCCESS
        );

        let failing = StaticSource(vec![
            FixtureDecl::new("red")
                .with_unit(UnitDecl::new("broken", |_| TestSignal::mismatch(1, 2, "off by one"))),
        ]);
        let err = run_suite(&failing, None, Verbosity::Quiet).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.is_empty());
    }
}
