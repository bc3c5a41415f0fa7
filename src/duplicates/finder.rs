//! The scan pipeline: walk, hash, group.
//!
//! # Overview
//!
//! [`DuplicateFinder::scan`] is the single entry point the rest of the
//! application consumes. One scan pass:
//!
//! 1. **Walk**: enumerate every regular file under the root in discovery
//!    order, collecting traversal problems as warnings.
//! 2. **Hash**: compute the MD5 digest of every discovered file. Digests
//!    are independent per file, so this step fans out across a rayon
//!    thread pool; results are reduced by a single sequential aggregator,
//!    which preserves discovery order and keeps the result mapping free
//!    of data races.
//! 3. **Group**: insert each (digest, record) pair into the digest-keyed
//!    result mapping.
//!
//! A bad root aborts before any enumeration. A file that cannot be read
//! is excluded from all groups and recorded as a warning; it never aborts
//! the scan. Failed reads are not retried.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::DuplicateFinder;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let result = finder.scan(Path::new("/home/user/Downloads")).unwrap();
//! for group in result.duplicate_groups() {
//!     println!("{} x{}", group.digest_hex(), group.len());
//! }
//! ```

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use crate::scanner::{Digest, FileRecord, HashError, Hasher, ScanError, Walker};

use super::groups::{ScanResult, ScanWarning};

/// Configuration for the scan pipeline.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Number of I/O threads for hashing.
    /// Default is 4 to prevent disk thrashing.
    pub io_threads: usize,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            io_threads: 4,
            shutdown_flag: None,
        }
    }
}

impl FinderConfig {
    /// Set the I/O thread count, clamped to at least one thread.
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Check if shutdown has been requested.
    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Orchestrates one scan pass over one root path.
#[derive(Debug, Default)]
pub struct DuplicateFinder {
    config: FinderConfig,
}

impl DuplicateFinder {
    /// Create a finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Create a finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Scan a directory tree and group its files by content digest.
    ///
    /// Returns the full digest-to-group mapping, singleton groups
    /// included, along with per-file warnings and summary statistics.
    ///
    /// # Errors
    ///
    /// - [`ScanError::NotFound`] / [`ScanError::NotADirectory`] if the
    ///   root is invalid; surfaced before any I/O, no partial result.
    /// - [`ScanError::Interrupted`] if a shutdown was requested; no
    ///   partial result is returned.
    /// - [`ScanError::ThreadPool`] if the hashing pool cannot be built.
    pub fn scan(&self, root: &Path) -> Result<ScanResult, ScanError> {
        let scan_start = Instant::now();
        let mut result = ScanResult::default();

        // Walk phase: collect records in discovery order, traversal
        // problems become warnings rather than aborting
        let mut walker = Walker::new(root);
        if let Some(flag) = &self.config.shutdown_flag {
            walker = walker.with_shutdown_flag(Arc::clone(flag));
        }

        let mut records: Vec<FileRecord> = Vec::new();
        for entry in walker.walk()? {
            match entry {
                Ok(record) => records.push(record),
                Err(ScanError::Interrupted) => return Err(ScanError::Interrupted),
                Err(err) => {
                    log::warn!("{err}");
                    result.push_warning(ScanWarning::Traversal(err));
                }
            }
        }
        let walk_duration = scan_start.elapsed();
        log::info!(
            "Walk complete: {} file(s) discovered in {:.1?}",
            records.len(),
            walk_duration
        );

        // Hash phase: fan out across the pool, keep discovery order
        let hash_start = Instant::now();
        let mut hasher = Hasher::new();
        if let Some(flag) = &self.config.shutdown_flag {
            hasher = hasher.with_shutdown_flag(Arc::clone(flag));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.io_threads)
            .build()
            .map_err(|e| ScanError::ThreadPool(e.to_string()))?;

        let outcomes: Vec<(FileRecord, Result<Digest, HashError>)> = pool.install(|| {
            records
                .into_par_iter()
                .map(|record| {
                    let digest = record.digest(&hasher);
                    (record, digest)
                })
                .collect()
        });

        // Sequential aggregation: the result mapping is only ever touched
        // from this thread
        for (record, outcome) in outcomes {
            match outcome {
                Ok(digest) => result.insert(digest, record),
                Err(HashError::Interrupted) => return Err(ScanError::Interrupted),
                Err(err) => {
                    log::warn!("Skipping {}: {err}", record.path().display());
                    result.push_warning(ScanWarning::UnreadableFile(err));
                }
            }
        }
        if self.config.is_shutdown_requested() {
            return Err(ScanError::Interrupted);
        }
        let hash_duration = hash_start.elapsed();

        result.finalize(walk_duration, hash_duration, scan_start.elapsed());
        let summary = result.summary();
        log::info!(
            "Scan complete: {} file(s), {} duplicate group(s), {} warning(s) in {:.1?}",
            summary.total_files,
            summary.duplicate_groups,
            result.warnings().len(),
            summary.scan_duration
        );

        Ok(result)
    }
}
