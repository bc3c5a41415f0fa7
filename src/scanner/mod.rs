//! Scanner module for directory traversal and file fingerprinting.
//!
//! This module provides functionality for:
//! - Recursive directory walking via walkdir
//! - Streaming MD5 content digests
//! - Lazily-computed, memoized per-file digests
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: MD5 file hashing (streaming, fixed-size chunks)
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{Hasher, Walker};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."));
//! let hasher = Hasher::new();
//! for entry in walker.walk().unwrap() {
//!     match entry {
//!         Ok(record) => {
//!             let digest = record.digest(&hasher).unwrap();
//!             println!("{}: {}", record.path().display(), Hasher::digest_to_hex(&digest));
//!         }
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// Re-export main types
pub use hasher::{Digest, Hasher, CHUNK_SIZE, DIGEST_LEN, EMPTY_DIGEST_HEX};
pub use walker::Walker;

/// One filesystem entry considered for duplicate comparison.
///
/// Holds the absolute path, the byte size from metadata, and a
/// lazily-computed MD5 digest. The digest is computed at most once per
/// record and cached for the record's lifetime.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Absolute path to the file
    path: PathBuf,
    /// File size in bytes
    size: u64,
    /// Memoized content digest, filled on first access
    digest: OnceLock<Digest>,
}

impl FileRecord {
    /// Create a new record with no digest computed yet.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self {
            path,
            size,
            digest: OnceLock::new(),
        }
    }

    /// Path to the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File size in bytes, as reported by metadata at discovery time.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Content digest of the file, computed on first access and cached.
    ///
    /// Repeated calls return the cached value without touching the
    /// filesystem again.
    ///
    /// # Errors
    ///
    /// Returns a [`HashError`] if the file cannot be read. A failed
    /// computation is not cached, so a later call retries.
    pub fn digest(&self, hasher: &Hasher) -> Result<Digest, HashError> {
        if let Some(digest) = self.digest.get() {
            return Ok(*digest);
        }
        let computed = hasher.hash_file(&self.path)?;
        Ok(*self.digest.get_or_init(|| computed))
    }

    /// The cached digest, if one has been computed.
    #[must_use]
    pub fn cached_digest(&self) -> Option<&Digest> {
        self.digest.get()
    }

    /// Content equality check: equal size and equal digest.
    ///
    /// Size is compared first since it is free; digests are only computed
    /// when the sizes match.
    ///
    /// # Errors
    ///
    /// Returns a [`HashError`] if either file cannot be read.
    pub fn same_content(&self, other: &Self, hasher: &Hasher) -> Result<bool, HashError> {
        if self.size != other.size {
            return Ok(false);
        }
        Ok(self.digest(hasher)? == other.digest(hasher)?)
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The hashing thread pool could not be created.
    #[error("Failed to build hashing thread pool: {0}")]
    ThreadPool(String),

    /// The scan was interrupted before completion.
    #[error("Scan interrupted")]
    Interrupted,
}

/// Errors that can occur while digesting a single file.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The file disappeared between discovery and hashing.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Hashing was interrupted by a shutdown request.
    #[error("Hashing interrupted")]
    Interrupted,
}

impl HashError {
    /// Classify an I/O error from reading `path`.
    pub(crate) fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_record_new() {
        let record = FileRecord::new(PathBuf::from("/test/file.txt"), 1024);

        assert_eq!(record.path(), Path::new("/test/file.txt"));
        assert_eq!(record.size(), 1024);
        assert!(record.cached_digest().is_none());
    }

    fn record_with_content(dir: &Path, name: &str, content: &[u8]) -> FileRecord {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        FileRecord::new(path, content.len() as u64)
    }

    #[test]
    fn test_same_content_size_mismatch_skips_digest() {
        let dir = tempdir().unwrap();
        let short = record_with_content(dir.path(), "short.txt", b"abc");
        let long = record_with_content(dir.path(), "long.txt", b"abcd");

        let hasher = Hasher::new();
        assert!(!short.same_content(&long, &hasher).unwrap());

        // The size pre-filter short-circuits: neither digest is computed
        assert!(short.cached_digest().is_none());
        assert!(long.cached_digest().is_none());
    }

    #[test]
    fn test_same_content_equal_bytes() {
        let dir = tempdir().unwrap();
        let a = record_with_content(dir.path(), "a.txt", b"twin");
        let b = record_with_content(dir.path(), "b.txt", b"twin");

        let hasher = Hasher::new();
        assert!(a.same_content(&b, &hasher).unwrap());

        // Both digests were computed and cached along the way
        assert!(a.cached_digest().is_some());
        assert_eq!(a.cached_digest(), b.cached_digest());
    }

    #[test]
    fn test_same_content_equal_size_different_bytes() {
        let dir = tempdir().unwrap();
        let a = record_with_content(dir.path(), "a.txt", b"aaaa");
        let b = record_with_content(dir.path(), "b.txt", b"bbbb");

        let hasher = Hasher::new();
        assert!(!a.same_content(&b, &hasher).unwrap());
        assert_ne!(a.cached_digest(), b.cached_digest());
    }

    #[test]
    fn test_same_content_missing_file_errors() {
        let dir = tempdir().unwrap();
        let a = record_with_content(dir.path(), "a.txt", b"here");
        let ghost = FileRecord::new(dir.path().join("ghost.txt"), 4);

        let hasher = Hasher::new();
        let err = a.same_content(&ghost, &hasher).unwrap_err();
        assert!(matches!(err, HashError::NotFound(_)));
    }

    #[test]
    fn test_scan_error_display() {
        let err = ScanError::NotFound(PathBuf::from("/missing"));
        assert_eq!(err.to_string(), "Path not found: /missing");

        let err = ScanError::NotADirectory(PathBuf::from("/file.txt"));
        assert_eq!(err.to_string(), "Not a directory: /file.txt");

        let err = ScanError::PermissionDenied(PathBuf::from("/test"));
        assert_eq!(err.to_string(), "Permission denied: /test");
    }

    #[test]
    fn test_hash_error_display() {
        let err = HashError::NotFound(PathBuf::from("/test"));
        assert_eq!(err.to_string(), "File not found: /test");

        let err = HashError::PermissionDenied(PathBuf::from("/secret"));
        assert_eq!(err.to_string(), "Permission denied: /secret");
    }

    #[test]
    fn test_hash_error_from_io_classification() {
        let path = Path::new("/some/file");

        let err = HashError::from_io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, HashError::NotFound(_)));

        let err = HashError::from_io(
            path,
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(matches!(err, HashError::PermissionDenied(_)));

        let err = HashError::from_io(
            path,
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short"),
        );
        assert!(matches!(err, HashError::Io { .. }));
    }
}
