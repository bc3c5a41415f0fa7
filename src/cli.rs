//! Command-line interface definitions for dupescan.
//!
//! All CLI arguments and subcommands use the clap derive API, with global
//! options (verbosity, color) and a `scan` subcommand for the pipeline.
//!
//! # Example
//!
//! ```bash
//! # Scan a directory and print the text report
//! dupescan scan ~/Downloads
//!
//! # Scan and also persist duplicates.json to the working directory
//! dupescan scan ~/Downloads --report
//!
//! # JSON on stdout for scripting
//! dupescan scan ~/Downloads --output json
//!
//! # Verbose mode for debugging
//! dupescan -v scan ~/Downloads
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Duplicate file finder using MD5 content fingerprinting.
///
/// dupescan walks a directory tree, fingerprints every regular file with
/// a streamed MD5 digest, and reports groups of byte-identical files.
#[derive(Debug, Parser)]
#[command(name = "dupescan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Emit errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for dupescan.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a directory tree for duplicate files
    Scan(ScanArgs),
}

/// Arguments for the scan subcommand.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Directory path to scan for duplicates
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Output format for stdout (text report or JSON)
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Also write duplicates.json to the current working directory
    #[arg(long)]
    pub report: bool,

    /// Number of I/O threads for hashing (default: 4)
    ///
    /// Lower values reduce disk thrashing on HDDs.
    #[arg(long, value_name = "N", default_value = "4")]
    pub threads: usize,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report
    Text,
    /// JSON output for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
