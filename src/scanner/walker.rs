//! Directory walker built on walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for enumerating every regular
//! file beneath a root directory, at any depth. Enumeration order is
//! deterministic (entries sorted by file name at each level), which keeps
//! repeated scans of an unchanged tree comparable.
//!
//! # Behavior
//!
//! - The root must exist and be a directory; otherwise [`Walker::walk`]
//!   fails before any enumeration begins.
//! - Non-regular entries (directories, symlinks, devices, sockets) are
//!   skipped and never yielded as files.
//! - Permission-denied on a subtree is yielded as an error item so the
//!   caller can skip it and continue with a partial result.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::Walker;
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"));
//! for entry in walker.walk().unwrap() {
//!     match entry {
//!         Ok(record) => println!("{}: {} bytes", record.path().display(), record.size()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::WalkDir;

use super::{FileRecord, ScanError};

/// Recursive file discovery under a single root directory.
#[derive(Debug, Clone)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Optional shutdown flag for graceful termination
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Walker {
    /// Create a new walker for the given root path.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            shutdown_flag: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// When the flag is set, the walker stops iterating as soon as the
    /// next entry is requested.
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

    /// Walk the tree, yielding a [`FileRecord`] per regular file.
    ///
    /// Validates the root before enumerating: a missing root fails with
    /// [`ScanError::NotFound`], a non-directory root with
    /// [`ScanError::NotADirectory`]. No partial result is produced in
    /// either case.
    ///
    /// The returned iterator yields per-entry errors (unreadable
    /// subtrees, stat failures) as `Err` items rather than stopping;
    /// the walk itself continues past them. A shutdown request yields
    /// a single [`ScanError::Interrupted`] item, after which the
    /// iterator is fused: no further entries are read from the tree.
    ///
    /// # Errors
    ///
    /// Fails fast if the root does not exist, is not a directory, or
    /// cannot be resolved to an absolute path.
    pub fn walk(&self) -> Result<impl Iterator<Item = Result<FileRecord, ScanError>> + '_, ScanError> {
        let meta = fs::metadata(&self.root).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ScanError::NotFound(self.root.clone()),
            std::io::ErrorKind::PermissionDenied => ScanError::PermissionDenied(self.root.clone()),
            _ => ScanError::Io {
                path: self.root.clone(),
                source: e,
            },
        })?;
        if !meta.is_dir() {
            return Err(ScanError::NotADirectory(self.root.clone()));
        }

        // Records carry absolute paths regardless of how the root was given
        let root = fs::canonicalize(&self.root).map_err(|e| ScanError::Io {
            path: self.root.clone(),
            source: e,
        })?;
        log::debug!("Walking {}", root.display());

        let mut entries = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();
        let mut interrupted = false;

        let iter = std::iter::from_fn(move || loop {
            // Latched on interrupt so collect()-style callers stop
            // driving the traversal
            if interrupted {
                return None;
            }
            if self.is_shutdown_requested() {
                log::debug!("Walker: shutdown requested, stopping iteration");
                interrupted = true;
                return Some(Err(ScanError::Interrupted));
            }

            match entries.next()? {
                Ok(entry) => {
                    // Regular files only; directories, symlinks and
                    // special files are never yielded
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    match entry.metadata() {
                        Ok(meta) => {
                            let record = FileRecord::new(entry.into_path(), meta.len());
                            log::trace!(
                                "Discovered {} ({} bytes)",
                                record.path().display(),
                                record.size()
                            );
                            return Some(Ok(record));
                        }
                        Err(e) => {
                            let path = entry.path().to_path_buf();
                            let source = e
                                .into_io_error()
                                .unwrap_or_else(|| std::io::Error::other("stat failed"));
                            return Some(Err(ScanError::Io { path, source }));
                        }
                    }
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map_or_else(|| self.root.clone(), Path::to_path_buf);
                    let is_permission = e
                        .io_error()
                        .is_some_and(|io| io.kind() == std::io::ErrorKind::PermissionDenied);
                    if is_permission {
                        return Some(Err(ScanError::PermissionDenied(path)));
                    }
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("traversal failed"));
                    return Some(Err(ScanError::Io { path, source }));
                }
            }
        });

        Ok(iter)
    }
}
