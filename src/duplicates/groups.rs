//! Digest-keyed duplicate groups and the scan result container.
//!
//! # Overview
//!
//! Files are grouped into equivalence classes keyed by their MD5 content
//! digest. Two files are duplicates if and only if their sizes are equal
//! and their digests are equal; with a fixed digest, equal content implies
//! equal size, so the digest is the grouping key and the size invariant is
//! asserted on insertion.
//!
//! [`ScanResult`] holds the *full* mapping, singleton groups included.
//! Callers filter to groups with two or more members when reporting
//! duplicates; keeping the full mapping lets them also derive file-count
//! and size statistics without re-scanning.
//!
//! # Ordering
//!
//! Group membership follows walker discovery order, and groups iterate in
//! first-seen digest order. Nothing is re-sorted, which keeps repeated
//! scans of an unchanged tree comparable.

use std::collections::HashMap;
use std::time::Duration;

use crate::scanner::{Digest, FileRecord, HashError, Hasher, ScanError};

/// A digest value together with every file sharing that digest.
///
/// Invariant: all members have identical byte size and identical digest.
/// A group with fewer than two members is not a duplicate group.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    /// MD5 digest shared by all members (16 bytes)
    digest: Digest,
    /// Byte size shared by all members
    size: u64,
    /// Members in discovery order
    files: Vec<FileRecord>,
}

impl DuplicateGroup {
    /// Create an empty group for the given digest and size.
    #[must_use]
    pub fn new(digest: Digest, size: u64) -> Self {
        Self {
            digest,
            size,
            files: Vec::new(),
        }
    }

    /// Append a member, preserving insertion order.
    ///
    /// # Panics
    ///
    /// Debug assertion fails if the file size does not match the group size.
    pub fn push(&mut self, file: FileRecord) {
        debug_assert_eq!(
            file.size(),
            self.size,
            "File size {} doesn't match group size {}",
            file.size(),
            self.size
        );
        self.files.push(file);
    }

    /// The digest shared by every member.
    #[must_use]
    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// The digest as a lowercase hex string.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        Hasher::digest_to_hex(&self.digest)
    }

    /// The byte size shared by every member.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Members in discovery order.
    #[must_use]
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether this group qualifies as a duplicate group (2+ members).
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        self.files.len() > 1
    }

    /// Total size of all members combined.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.size * self.files.len() as u64
    }

    /// Space reclaimable by keeping a single copy.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        if self.files.len() > 1 {
            self.size * (self.files.len() as u64 - 1)
        } else {
            0
        }
    }

    /// Just the member paths, in discovery order.
    #[must_use]
    pub fn paths(&self) -> Vec<std::path::PathBuf> {
        self.files.iter().map(|f| f.path().to_path_buf()).collect()
    }
}

/// A non-fatal condition recorded during a scan.
///
/// Warnings never abort the scan and never change the exit status; they
/// are surfaced alongside the result instead of being silently dropped.
#[derive(Debug, thiserror::Error)]
pub enum ScanWarning {
    /// A discovered file could not be fully read (deleted or permission
    /// revoked mid-scan). The file is excluded from all groups.
    #[error("Skipped unreadable file: {0}")]
    UnreadableFile(HashError),

    /// A subtree or entry could not be traversed. The walk continued
    /// past it, so the result is partial.
    #[error("Skipped during traversal: {0}")]
    Traversal(ScanError),
}

/// Summary statistics for one scan pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Number of files that entered a group
    pub total_files: usize,
    /// Combined size of all grouped files in bytes
    pub total_size: u64,
    /// Number of groups with 2+ members
    pub duplicate_groups: usize,
    /// Number of redundant copies across all duplicate groups
    pub duplicate_files: usize,
    /// Space reclaimable by keeping one copy per duplicate group
    pub reclaimable_space: u64,
    /// Duration of the walking phase
    pub walk_duration: Duration,
    /// Duration of the hashing phase
    pub hash_duration: Duration,
    /// Total scan duration
    pub scan_duration: Duration,
}

/// The full digest-to-group mapping produced by one scan pass.
///
/// Immutable once returned by the finder; the caller owns it exclusively
/// and nothing persists between runs.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Groups in first-seen digest order
    groups: Vec<DuplicateGroup>,
    /// Digest to position in `groups`
    index: HashMap<Digest, usize>,
    /// Non-fatal conditions collected along the way
    warnings: Vec<ScanWarning>,
    /// Summary statistics, filled by `finalize`
    summary: ScanSummary,
}

impl ScanResult {
    /// Insert a record under its digest, creating the group on first sight.
    pub(crate) fn insert(&mut self, digest: Digest, record: FileRecord) {
        let idx = match self.index.get(&digest) {
            Some(&idx) => idx,
            None => {
                let idx = self.groups.len();
                self.groups.push(DuplicateGroup::new(digest, record.size()));
                self.index.insert(digest, idx);
                idx
            }
        };
        self.groups[idx].push(record);
    }

    /// Record a non-fatal condition.
    pub(crate) fn push_warning(&mut self, warning: ScanWarning) {
        self.warnings.push(warning);
    }

    /// Compute summary counts and store phase durations.
    pub(crate) fn finalize(&mut self, walk: Duration, hash: Duration, total: Duration) {
        let mut summary = ScanSummary {
            walk_duration: walk,
            hash_duration: hash,
            scan_duration: total,
            ..ScanSummary::default()
        };
        for group in &self.groups {
            summary.total_files += group.len();
            summary.total_size += group.total_size();
            if group.is_duplicate() {
                summary.duplicate_groups += 1;
                summary.duplicate_files += group.len() - 1;
                summary.reclaimable_space += group.wasted_space();
            }
        }
        self.summary = summary;
    }

    /// All groups, singletons included, in first-seen digest order.
    #[must_use]
    pub fn groups(&self) -> &[DuplicateGroup] {
        &self.groups
    }

    /// Look up the group for a digest, if any file hashed to it.
    #[must_use]
    pub fn group(&self, digest: &Digest) -> Option<&DuplicateGroup> {
        self.index.get(digest).map(|&idx| &self.groups[idx])
    }

    /// Only the groups with two or more members, in first-seen order.
    pub fn duplicate_groups(&self) -> impl Iterator<Item = &DuplicateGroup> {
        self.groups.iter().filter(|g| g.is_duplicate())
    }

    /// Non-fatal conditions recorded during the scan.
    #[must_use]
    pub fn warnings(&self) -> &[ScanWarning] {
        &self.warnings
    }

    /// Summary statistics for this scan.
    #[must_use]
    pub fn summary(&self) -> &ScanSummary {
        &self.summary
    }

    /// Check if no files were grouped at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
