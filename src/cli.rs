//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`ExportFormat`] - Export file formats produced by the exporter
//! - [`CopyMethod`] - Attachment handling modes passed to the exporter
//!
//! # Using ExportFormat in Libraries
//!
//! The enums are designed to be usable outside of CLI context:
//!
//! ```rust
//! use msgtidy::cli::ExportFormat;
//!
//! let format = ExportFormat::Html;
//! assert_eq!(format.extension(), "html");
//! ```

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TidyError};

/// Rename iMessage export files to contact names and stamp them with
/// the dates of their first and last messages.
#[derive(Parser, Debug, Clone)]
#[command(name = "msgtidy")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    msgtidy
    msgtidy -o ~/exports -f html
    msgtidy -f txt -s 2024-01-01 -e 2024-12-31
    msgtidy --dry-run --verbose
    msgtidy --no-rename")]
pub struct Args {
    /// Target export directory
    #[arg(short, long, default_value = "./imessage_export", value_name = "DIR")]
    pub output: String,

    /// Export format
    #[arg(short, long, value_enum, default_value = "txt")]
    pub format: ExportFormat,

    /// Attachment handling passed to the exporter
    #[arg(short, long, value_enum, default_value = "disabled")]
    pub copy_method: CopyMethod,

    /// Override the source message database path
    #[arg(short = 'p', long, value_name = "PATH")]
    pub db_path: Option<String>,

    /// Override the attachment root directory
    #[arg(short = 'r', long, value_name = "PATH")]
    pub attachment_root: Option<String>,

    /// Only export messages on or after this date (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE")]
    pub start_date: Option<String>,

    /// Only export messages on or before this date (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE")]
    pub end_date: Option<String>,

    /// Skip contact-based renaming
    #[arg(long)]
    pub no_rename: bool,

    /// Compute and report every change without touching any file
    #[arg(long)]
    pub dry_run: bool,

    /// Detailed per-file logging
    #[arg(long)]
    pub verbose: bool,
}

impl Args {
    /// Validates date filter values before any work begins.
    ///
    /// # Errors
    ///
    /// Returns [`TidyError::InvalidDate`] if `--start-date` or `--end-date`
    /// is not a valid `YYYY-MM-DD` date.
    pub fn validate(&self) -> Result<()> {
        for date in [&self.start_date, &self.end_date].into_iter().flatten() {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|_| TidyError::invalid_date(date))?;
        }
        Ok(())
    }
}

/// Export file formats.
///
/// The exporter writes one file per conversation, either plain text or
/// HTML. The format decides both the file extension scanned for and the
/// date extraction strategy applied to file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Plain-text conversation files
    #[default]
    Txt,

    /// HTML conversation files
    Html,
}

impl ExportFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Html => "html",
        }
    }

    /// Returns the flag value understood by the export subprocess.
    pub fn as_flag(&self) -> &'static str {
        self.extension()
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["txt", "html"]
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Txt => write!(f, "TXT"),
            ExportFormat::Html => write!(f, "HTML"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Txt),
            "html" | "htm" => Ok(ExportFormat::Html),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                ExportFormat::all_names().join(", ")
            )),
        }
    }
}

/// Attachment handling modes.
///
/// Passed through to the export subprocess unchanged; msgtidy itself
/// never touches attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyMethod {
    /// Do not copy attachments
    #[default]
    Disabled,

    /// Clone attachments (copy-on-write where the filesystem supports it)
    Clone,

    /// Copy attachments without converting them
    Basic,

    /// Copy and convert attachments to portable formats
    Full,
}

impl CopyMethod {
    /// Returns the flag value understood by the export subprocess.
    pub fn as_flag(&self) -> &'static str {
        match self {
            CopyMethod::Disabled => "disabled",
            CopyMethod::Clone => "clone",
            CopyMethod::Basic => "basic",
            CopyMethod::Full => "full",
        }
    }

    /// Returns all supported copy method names.
    pub fn all_names() -> &'static [&'static str] {
        &["disabled", "clone", "basic", "full"]
    }
}

impl std::fmt::Display for CopyMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_flag())
    }
}

impl std::str::FromStr for CopyMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disabled" => Ok(CopyMethod::Disabled),
            "clone" => Ok(CopyMethod::Clone),
            "basic" => Ok(CopyMethod::Basic),
            "full" => Ok(CopyMethod::Full),
            _ => Err(format!(
                "Unknown copy method: '{}'. Expected one of: {}",
                s,
                CopyMethod::all_names().join(", ")
            )),
        }
    }
}
