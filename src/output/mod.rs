//! Output formatters for duplicate scan results.
//!
//! This module provides the two report surfaces:
//! - A human-readable text report printed to a writer
//! - A JSON report for automation, optionally persisted to disk
//!
//! Both report only the groups with two or more members; singleton groups
//! stay in the [`ScanResult`] for statistics but are never printed.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::DuplicateFinder;
//! use dupescan::output::print_report;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let result = finder.scan(Path::new(".")).unwrap();
//! print_report(&result, &mut std::io::stdout()).unwrap();
//! ```

pub mod json;

use std::io::Write;

use bytesize::ByteSize;
use yansi::Paint;

use crate::duplicates::ScanResult;

// Re-export main types
pub use json::{JsonReport, ReportError, REPORT_FILENAME};

/// Print the human-readable duplicate report.
///
/// For each group with 2+ members: a header line with the lowercase hex
/// digest, then the absolute path of every member, one per line. Ends
/// with a one-line summary. Warnings are reported by the caller via the
/// log, not here.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn print_report<W: Write>(result: &ScanResult, writer: &mut W) -> std::io::Result<()> {
    let mut any = false;
    for group in result.duplicate_groups() {
        any = true;
        writeln!(
            writer,
            "{} {}",
            "Duplicates with md5 checksum".yellow().bold(),
            group.digest_hex().yellow()
        )?;
        for file in group.files() {
            writeln!(writer, "  {}", file.path().display())?;
        }
    }
    if !any {
        writeln!(writer, "{}", "No duplicates found.".green())?;
    }

    let summary = result.summary();
    writeln!(
        writer,
        "{} file(s) scanned ({}), {} duplicate group(s), {} reclaimable",
        summary.total_files,
        ByteSize(summary.total_size),
        summary.duplicate_groups,
        ByteSize(summary.reclaimable_space)
    )?;
    Ok(())
}
