//! MD5 file hasher with streaming support.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct for computing MD5 digests of
//! file contents. Files are read in fixed-size chunks and fed through an
//! incremental accumulator, so memory use stays bounded regardless of file
//! size. MD5 is a pure function of the byte content, which makes digests
//! deterministic across repeated runs on an unchanged file.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::Hasher;
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! let digest = hasher.hash_file(Path::new("/etc/hostname")).unwrap();
//! println!("{}", Hasher::digest_to_hex(&digest));
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use md5::{Digest as _, Md5};

use super::HashError;

/// A 128-bit MD5 content digest.
pub type Digest = [u8; DIGEST_LEN];

/// Length of an MD5 digest in bytes.
pub const DIGEST_LEN: usize = 16;

/// Read chunk size in bytes. Not semantically significant; bounds memory
/// use per file regardless of file size.
pub const CHUNK_SIZE: usize = 4096;

/// Lowercase hex digest of the empty byte sequence. Every zero-byte file
/// hashes to this value.
pub const EMPTY_DIGEST_HEX: &str = "d41d8cd98f00b204e9800998ecf8427e";

/// Streaming MD5 hasher for file contents.
///
/// Stateless apart from an optional shutdown flag, so a single instance
/// can be shared across hashing threads.
#[derive(Debug, Default, Clone)]
pub struct Hasher {
    /// Optional shutdown flag checked at each chunk boundary
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Hasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// The flag is checked between chunk reads, so a long hash of a large
    /// file aborts promptly with [`HashError::Interrupted`].
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

    /// Compute the MD5 digest of a file's full contents.
    ///
    /// Streams the file in [`CHUNK_SIZE`] chunks through an incremental
    /// MD5 accumulator. A zero-byte file produces the well-known empty
    /// digest ([`EMPTY_DIGEST_HEX`]).
    ///
    /// # Errors
    ///
    /// - [`HashError::NotFound`] if the file vanished since discovery
    /// - [`HashError::PermissionDenied`] if it cannot be opened or read
    /// - [`HashError::Io`] for any other read failure mid-stream
    /// - [`HashError::Interrupted`] if a shutdown was requested
    pub fn hash_file(&self, path: &Path) -> Result<Digest, HashError> {
        let mut file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let mut md5 = Md5::new();
        let mut buf = [0u8; CHUNK_SIZE];

        loop {
            if self.is_shutdown_requested() {
                log::debug!("Hasher: shutdown requested, aborting {}", path.display());
                return Err(HashError::Interrupted);
            }
            let read = file
                .read(&mut buf)
                .map_err(|e| HashError::from_io(path, e))?;
            if read == 0 {
                break;
            }
            md5.update(&buf[..read]);
        }

        Ok(md5.finalize().into())
    }

    /// Render a digest as a lowercase hexadecimal string (32 characters).
    #[must_use]
    pub fn digest_to_hex(digest: &Digest) -> String {
        let mut hex = String::with_capacity(DIGEST_LEN * 2);
        for byte in digest {
            hex.push_str(&format!("{byte:02x}"));
        }
        hex
    }

    /// Parse a lowercase hex string back into a digest.
    ///
    /// Returns `None` if the string is not exactly 32 hex characters.
    #[must_use]
    pub fn hex_to_digest(hex: &str) -> Option<Digest> {
        if hex.len() != DIGEST_LEN * 2 {
            return None;
        }
        let mut digest = [0u8; DIGEST_LEN];
        for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
            let s = std::str::from_utf8(chunk).ok()?;
            digest[i] = u8::from_str_radix(s, 16).ok()?;
        }
        Some(digest)
    }
}
