//! Unified error types for msgtidy.
//!
//! This module provides a single [`TidyError`] enum that covers all error
//! cases in the library, mirroring the single-enum pattern used by crates
//! like `reqwest`, `serde_json`, and `csv`.
//!
//! # Error Handling Philosophy
//!
//! Errors fall into two groups with very different lifecycles:
//!
//! - **Fatal**: bad CLI arguments, an invalid matching pattern at startup,
//!   or a failed export subprocess. These stop the run before (or instead
//!   of) any file processing.
//! - **Per-item**: I/O failures on a single file and contact-store
//!   problems. These are logged, counted, and processing continues with
//!   the next item.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for msgtidy operations.
pub type Result<T> = std::result::Result<T, TidyError>;

/// The error type for all msgtidy operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TidyError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The export directory doesn't exist
    /// - A rename target can't be written
    /// - File timestamps can't be updated (permissions, locked file)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Invalid date passed to a `--start-date`/`--end-date` filter.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// A matching pattern failed to compile at startup.
    ///
    /// Patterns are fixed at build time, so this indicates a packaging
    /// defect rather than bad user input. It is surfaced as an explicit
    /// configuration error instead of a panic.
    #[error("Invalid matching pattern '{name}': {source}")]
    Pattern {
        /// Which pattern failed (e.g. "text line-anchored timestamp")
        name: &'static str,
        /// The underlying regex compilation error
        #[source]
        source: regex::Error,
    },

    /// The export subprocess could not be run or exited non-zero.
    ///
    /// This is fatal: without a successful export there is nothing to
    /// post-process.
    #[error("Export failed: {detail}")]
    Exporter {
        /// Description of the failure (spawn error or exit status)
        detail: String,
    },

    /// The contact store could not be queried.
    ///
    /// Callers degrade this to an empty contact index (renaming disabled)
    /// rather than aborting the run.
    #[error("Contact store error: {0}")]
    ContactStore(String),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl TidyError {
    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        TidyError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates a pattern compilation error.
    pub fn pattern(name: &'static str, source: regex::Error) -> Self {
        TidyError::Pattern { name, source }
    }

    /// Creates an exporter failure error.
    pub fn exporter(detail: impl Into<String>) -> Self {
        TidyError::Exporter {
            detail: detail.into(),
        }
    }

    /// Creates a contact store error.
    pub fn contact_store(detail: impl Into<String>) -> Self {
        TidyError::ContactStore(detail.into())
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, TidyError::Io(_))
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, TidyError::InvalidDate { .. })
    }

    /// Returns `true` if this error is fatal to the whole run.
    ///
    /// Contact-store and per-file I/O errors are recoverable; everything
    /// else stops the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, TidyError::Io(_) | TidyError::ContactStore(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
