//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Grouping files into equivalence classes by content digest
//! - The scan pipeline orchestrating walking, hashing and grouping
//! - Scan results, warnings and summary statistics

pub mod finder;
pub mod groups;

pub use finder::{DuplicateFinder, FinderConfig};
pub use groups::{DuplicateGroup, ScanResult, ScanSummary, ScanWarning};
