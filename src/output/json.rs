//! JSON report for duplicate scan results.
//!
//! Provides machine-readable output for scripting and automation, and the
//! persisted report file.
//!
//! # Output Schema
//!
//! An object mapping each duplicate digest to the ordered list of member
//! paths, nothing else:
//!
//! ```json
//! {
//!   "5d41402abc4b2a76b9719d911017c592": [
//!     "/path/to/a.txt",
//!     "/path/to/b.txt"
//!   ]
//! }
//! ```
//!
//! Keys are lowercase hex digest strings in discovery order; values are
//! arrays of absolute path strings. A scan with zero duplicate groups
//! serializes to `{}`, which is still a valid report.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::DuplicateFinder;
//! use dupescan::output::JsonReport;
//! use std::path::Path;
//!
//! let result = DuplicateFinder::with_defaults().scan(Path::new(".")).unwrap();
//! let report = JsonReport::from_scan(&result);
//! println!("{}", report.to_json_pretty().unwrap());
//! report.save_in(Path::new(".")).unwrap();
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::duplicates::ScanResult;

/// Well-known filename for the persisted report, written to the current
/// working directory.
pub const REPORT_FILENAME: &str = "duplicates.json";

/// The JSON report: duplicate digests mapped to member paths.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct JsonReport {
    /// Digest hex string to ordered member paths
    groups: Map<String, Value>,
}

impl JsonReport {
    /// Build a report from a scan result.
    ///
    /// Only groups with 2+ members are included. Keys follow first-seen
    /// digest order and members keep walker discovery order.
    #[must_use]
    pub fn from_scan(result: &ScanResult) -> Self {
        let mut groups = Map::new();
        for group in result.duplicate_groups() {
            let paths: Vec<Value> = group
                .files()
                .iter()
                .map(|f| Value::String(f.path().to_string_lossy().into_owned()))
                .collect();
            groups.insert(group.digest_hex(), Value::Array(paths));
        }
        Self { groups }
    }

    /// Number of duplicate groups in the report.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if the report has no duplicate groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Serialize to a compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to a pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the report to a writer, pretty-printed or compact.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), ReportError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    /// Persist the report as [`REPORT_FILENAME`] inside `dir`.
    ///
    /// Returns the path of the written file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the filesystem write fails.
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf, ReportError> {
        let path = dir.join(REPORT_FILENAME);
        let mut file = std::fs::File::create(&path)?;
        self.write_to(&mut file, true)?;
        log::info!("Report written to {}", path.display());
        Ok(path)
    }
}

/// Errors that can occur while producing the JSON report.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error while writing report: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::DuplicateFinder;
    use std::fs::File;
    use std::io::Write as _;
    use tempfile::tempdir;

    fn scan_dir(dir: &Path) -> ScanResult {
        DuplicateFinder::with_defaults().scan(dir).unwrap()
    }

    #[test]
    fn test_report_empty_is_valid_object() {
        let dir = tempdir().unwrap();
        let report = JsonReport::from_scan(&scan_dir(dir.path()));

        assert!(report.is_empty());
        assert_eq!(report.to_json().unwrap(), "{}");
    }

    #[test]
    fn test_report_contains_only_duplicates() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("a.txt"))
            .unwrap()
            .write_all(b"hello")
            .unwrap();
        File::create(dir.path().join("b.txt"))
            .unwrap()
            .write_all(b"hello")
            .unwrap();
        File::create(dir.path().join("c.txt"))
            .unwrap()
            .write_all(b"world")
            .unwrap();

        let report = JsonReport::from_scan(&scan_dir(dir.path()));
        assert_eq!(report.len(), 1);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        let obj = json.as_object().unwrap();
        // Exactly one key: md5("hello")
        assert_eq!(obj.len(), 1);
        let paths = obj["5d41402abc4b2a76b9719d911017c592"].as_array().unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].as_str().unwrap().ends_with("a.txt"));
        assert!(paths[1].as_str().unwrap().ends_with("b.txt"));
    }

    #[test]
    fn test_report_save_in_writes_well_known_filename() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("x.bin")).unwrap();
        File::create(dir.path().join("y.bin")).unwrap();

        let report = JsonReport::from_scan(&scan_dir(dir.path()));
        let out_dir = tempdir().unwrap();
        let written = report.save_in(out_dir.path()).unwrap();

        assert_eq!(written, out_dir.path().join(REPORT_FILENAME));
        let content = std::fs::read_to_string(&written).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        // Two empty files group under the empty-content digest
        assert!(json
            .as_object()
            .unwrap()
            .contains_key("d41d8cd98f00b204e9800998ecf8427e"));
    }

    #[test]
    fn test_write_to_compact_and_pretty() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("a"))
            .unwrap()
            .write_all(b"dup")
            .unwrap();
        File::create(dir.path().join("b"))
            .unwrap()
            .write_all(b"dup")
            .unwrap();

        let report = JsonReport::from_scan(&scan_dir(dir.path()));

        let mut compact = Vec::new();
        report.write_to(&mut compact, false).unwrap();
        let compact = String::from_utf8(compact).unwrap();
        assert_eq!(compact.lines().count(), 1);

        let mut pretty = Vec::new();
        report.write_to(&mut pretty, true).unwrap();
        let pretty = String::from_utf8(pretty).unwrap();
        assert!(pretty.lines().count() > 1);
    }
}
