//! dupescan - Duplicate File Finder
//!
//! A cross-platform CLI tool that walks a directory tree, fingerprints
//! every regular file with a streamed MD5 digest, and reports groups of
//! byte-identical files as text or JSON.

pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;
pub mod signal;

use std::path::Path;

use crate::cli::{Cli, Commands, OutputFormat, ScanArgs};
use crate::duplicates::{DuplicateFinder, FinderConfig};
use crate::error::ExitCode;
use crate::output::JsonReport;

/// Run the application with parsed CLI arguments.
///
/// Initializes logging, dispatches to the requested subcommand, and
/// returns the exit code for a normal completion.
///
/// # Errors
///
/// Returns an error for fatal conditions (invalid root, interruption,
/// report write failure). Per-file warnings are logged and do not fail
/// the run.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    }

    match cli.command {
        Commands::Scan(args) => run_scan(&args),
    }
}

/// Execute the scan subcommand.
fn run_scan(args: &ScanArgs) -> anyhow::Result<ExitCode> {
    let handler = signal::install_handler()?;
    let config = FinderConfig::default()
        .with_io_threads(args.threads)
        .with_shutdown_flag(handler.get_flag());

    let finder = DuplicateFinder::new(config);
    let result = finder.scan(&args.path)?;

    if !result.warnings().is_empty() {
        log::warn!(
            "Scan completed with {} warning(s); the result is partial",
            result.warnings().len()
        );
    }

    let stdout = std::io::stdout();
    match args.output {
        OutputFormat::Text => output::print_report(&result, &mut stdout.lock())?,
        OutputFormat::Json => {
            JsonReport::from_scan(&result).write_to(&mut stdout.lock(), true)?;
        }
    }

    if args.report {
        JsonReport::from_scan(&result).save_in(Path::new("."))?;
    }

    Ok(ExitCode::Success)
}
