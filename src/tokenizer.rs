//! Filename tokenization.
//!
//! Export filenames are comma-separated lists of conversation participants
//! as the exporter knew them: raw phone numbers, email addresses, and
//! sometimes names it already resolved. This module splits a filename into
//! identifier tokens and expands each into every lookup key it could match
//! under.
//!
//! # Example
//!
//! ```rust
//! use msgtidy::tokenizer::raw_identifiers;
//!
//! let ids = raw_identifiers("John, +14155551234, jane@x.com");
//! assert!(ids.contains(&"jane@x.com".to_string()));
//! assert!(ids.contains(&"4155551234".to_string()));
//! // "John" carries no digits and no '@': not an identifier, discarded.
//! assert!(!ids.contains(&"John".to_string()));
//! ```

use std::path::{Path, PathBuf};

use crate::cli::ExportFormat;
use crate::phone::phone_variants;

/// A single export file selected for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Full path to the file
    pub path: PathBuf,
    /// Format inferred from the extension
    pub format: ExportFormat,
    /// Filename without the extension
    pub stem: String,
}

impl ExportFile {
    /// Classifies a path as an export file by its extension.
    ///
    /// Returns `None` for directories, extensionless files, and files with
    /// extensions other than `txt`/`html`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        let format = match ext {
            "txt" => ExportFormat::Txt,
            "html" => ExportFormat::Html,
            _ => return None,
        };
        let stem = path.file_stem()?.to_str()?.to_string();
        Some(ExportFile {
            path: path.to_path_buf(),
            format,
            stem,
        })
    }
}

/// Splits a filename stem into raw identifier lookup keys.
///
/// The stem is split on commas and each part trimmed. A part containing at
/// least one digit is treated as a phone number and expanded into its full
/// variant set; a part containing `@` is treated as an email and
/// normalized to lowercase; anything else (typically a name the exporter
/// already resolved) is discarded.
///
/// Order follows the source order of parts, then variant-generation order
/// within a phone part. Duplicates across parts are kept; the resolver
/// deduplicates at the display-name level.
pub fn raw_identifiers(stem: &str) -> Vec<String> {
    let mut identifiers = Vec::new();

    for part in stem.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if part.chars().any(|c| c.is_ascii_digit()) {
            identifiers.extend(phone_variants(part));
        } else if part.contains('@') {
            identifiers.push(part.to_lowercase());
        }
    }

    identifiers
}
