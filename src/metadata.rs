//! File timestamp updates.
//!
//! Applies an extracted [`DateRange`] to a file's filesystem timestamps
//! in a single attribute-write call: the range minimum becomes the
//! creation-equivalent (accessed) time, the range maximum the
//! modification time. No portable API writes birth time, so the accessed
//! slot carries the minimum on every platform.
//!
//! Failures here (permissions, locked file) are per-file: callers report
//! and continue with the next item.

use std::path::Path;

use filetime::FileTime;

use crate::dates::DateRange;
use crate::error::Result;

/// Stamps a file with a date range.
///
/// # Errors
///
/// Returns [`crate::error::TidyError::Io`] if the attribute write fails.
pub fn apply_range(path: &Path, range: &DateRange) -> Result<()> {
    let created = to_file_time(&range.first);
    let modified = to_file_time(&range.last);
    filetime::set_file_times(path, created, modified)?;
    Ok(())
}

fn to_file_time(sample: &crate::dates::DateSample) -> FileTime {
    FileTime::from_unix_time(sample.timestamp(), sample.timestamp_subsec_nanos())
}
