//! Filename construction and rename application.
//!
//! Turns a resolved name list into a safe target filename, resolves
//! collisions with a numeric suffix, and performs (or simulates) the
//! move. The decision is computed as a value ([`RenameDecision`]) so that
//! dry runs and real renames share exactly one code path.
//!
//! Guarantees:
//! - an existing file is never overwritten; colliding targets get a
//!   ` (n)` suffix, counting up from 1
//! - re-running over an already-renamed directory is a no-op, because
//!   the recomputed target equals the current path

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Characters not allowed in target filenames.
const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// A planned rename, from the file's current path to its target path.
///
/// `from == to` marks a no-op: the file already carries its resolved
/// name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameDecision {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl RenameDecision {
    /// Returns `true` if the file is already correctly named.
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Sanitizes a display-name list into a filename base.
///
/// Each forbidden character becomes `_`, runs of two or more underscores
/// collapse to one, and leading/trailing underscores are trimmed.
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let c = if FORBIDDEN.contains(&c) { '_' } else { c };
        if c == '_' {
            if prev_underscore {
                continue;
            }
            prev_underscore = true;
        } else {
            prev_underscore = false;
        }
        out.push(c);
    }

    out.trim_matches('_').to_string()
}

/// Plans a rename for a file given its resolved display names.
///
/// Returns `None` when no rename should happen: the name list is empty
/// (unmatched file) or sanitization left nothing usable. Otherwise the
/// decision's target is the first collision-free candidate; a candidate
/// equal to the file's own path short-circuits into a no-op decision.
///
/// `claimed` holds targets already assigned earlier in the same run.
/// Treating them as occupied keeps dry runs faithful: a simulated rename
/// leaves no file behind for `exists()` to see, but later files must
/// still receive the same suffixes they would in a real run.
pub fn plan_rename(
    path: &Path,
    matched_names: &[String],
    claimed: &HashSet<PathBuf>,
) -> Option<RenameDecision> {
    if matched_names.is_empty() {
        return None;
    }

    let base = sanitize_name(&matched_names.join(", "));
    if base.is_empty() {
        // Display name was nothing but forbidden characters.
        return None;
    }

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut candidate = dir.join(join_filename(&base, ext));
    let mut n: u32 = 1;
    while candidate != path && (candidate.exists() || claimed.contains(&candidate)) {
        candidate = dir.join(join_filename(&format!("{base} ({n})"), ext));
        n += 1;
    }

    Some(RenameDecision {
        from: path.to_path_buf(),
        to: candidate,
    })
}

/// Applies a rename decision.
///
/// Returns `true` if the file actually moved: no-ops and dry runs leave
/// the filesystem untouched.
pub fn apply_rename(decision: &RenameDecision, dry_run: bool) -> Result<bool> {
    if decision.is_noop() || dry_run {
        return Ok(false);
    }
    fs::rename(&decision.from, &decision.to)?;
    Ok(true)
}

fn join_filename(base: &str, ext: &str) -> String {
    if ext.is_empty() {
        base.to_string()
    } else {
        format!("{base}.{ext}")
    }
}
