//! # msgtidy
//!
//! A Rust library and CLI for post-processing iMessage export files:
//! renaming them after the contacts they belong to and stamping their
//! filesystem timestamps with the dates of their first and last messages.
//!
//! ## Overview
//!
//! `imessage-exporter` writes one file per conversation, named after raw
//! participant identifiers (`+14155551234.txt`, `jane@x.com.html`).
//! msgtidy runs after the export and, for every file:
//!
//! 1. tokenizes the filename into phone/email identifiers
//! 2. resolves them against a contact index built once per run
//! 3. renames the file to the matched display names, with collision-safe
//!    numeric suffixes
//! 4. extracts message timestamps from the file content
//! 5. stamps the file's timestamps with the first/last message dates
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use msgtidy::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     let store = StaticContactStore::new(vec![ContactRecord {
//!         given_name: "Jane".into(),
//!         family_name: "Doe".into(),
//!         phones: vec!["+14155551234".into()],
//!         ..ContactRecord::default()
//!     }]);
//!
//!     let index = match store.request_access()? {
//!         Authorization::Granted => ContactIndex::from_records(&store.records()?),
//!         Authorization::Denied => ContactIndex::empty(),
//!     };
//!
//!     let patterns = ExtractorPatterns::new()?;
//!     let opts = ProcessOptions {
//!         rename: true,
//!         dry_run: false,
//!         verbose: false,
//!     };
//!     let report = process_directory(Path::new("./imessage_export"), &index, &patterns, &opts);
//!     println!("renamed {}", report.stats.renamed);
//!     Ok(())
//! }
//! ```
//!
//! ## Design Notes
//!
//! - The contact index is an explicit immutable value passed by
//!   reference; there is no global contact state.
//! - Plain-text and HTML files use deliberately different extraction
//!   policies (first-matching-pattern vs union-of-all-patterns); see
//!   [`dates`].
//! - All per-file failures degrade to counters; only argument errors,
//!   pattern-compilation errors, and a failed export subprocess abort a
//!   run.

pub mod cli;
pub mod contacts;
pub mod dates;
pub mod error;
pub mod exporter;
pub mod metadata;
pub mod phone;
pub mod processor;
pub mod rename;
pub mod resolver;
pub mod tokenizer;

pub use error::{Result, TidyError};

/// Commonly used imports for library consumers.
pub mod prelude {
    pub use crate::contacts::{
        Authorization, ContactIndex, ContactRecord, ContactStore, StaticContactStore,
        SystemContactStore,
    };
    pub use crate::dates::{date_range, DateRange, ExtractionStrategy, ExtractorPatterns};
    pub use crate::error::{Result, TidyError};
    pub use crate::metadata::apply_range;
    pub use crate::phone::phone_variants;
    pub use crate::processor::{process_directory, ProcessOptions, RunReport, RunStats};
    pub use crate::rename::{apply_rename, plan_rename, sanitize_name, RenameDecision};
    pub use crate::resolver::resolve_names;
    pub use crate::tokenizer::{raw_identifiers, ExportFile};
}
