//! Per-file processing pipeline and run statistics.
//!
//! Drives the per-file sequence over an export directory: tokenize the
//! filename, resolve contact names, rename (or simulate), extract message
//! dates from the possibly-renamed file, stamp its timestamps. Files are
//! visited one at a time in directory-listing order; that order is
//! platform-dependent and not guaranteed stable.
//!
//! Every per-file failure is reported and counted, never fatal: the run
//! always finishes with a complete [`RunStats`].

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::contacts::ContactIndex;
use crate::dates::{date_range, ExtractorPatterns};
use crate::metadata::apply_range;
use crate::rename::{apply_rename, plan_rename, RenameDecision};
use crate::resolver::resolve_names;
use crate::tokenizer::{raw_identifiers, ExportFile};

/// Processing switches derived from the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessOptions {
    /// Attempt contact-based renaming
    pub rename: bool,
    /// Compute every change but mutate nothing
    pub dry_run: bool,
    /// Per-file detail logging
    pub verbose: bool,
}

/// Aggregate counters for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Files renamed (or whose rename was simulated)
    pub renamed: usize,
    /// Files already carrying their resolved name
    pub already_named: usize,
    /// Files with no contact match
    pub unmatched: usize,
    /// Rename attempts that failed on I/O
    pub rename_failed: usize,
    /// Files whose timestamps were updated (or would be)
    pub stamped: usize,
    /// Files containing no parsable dates
    pub no_dates: usize,
    /// Timestamp updates that failed on I/O
    pub stamp_failed: usize,
}

impl RunStats {
    /// Total number of export files visited.
    pub fn files_seen(&self) -> usize {
        self.stamped + self.no_dates + self.stamp_failed
    }
}

/// Outcome of a directory run: counters plus the rename decisions made.
///
/// The decision list is identical between a dry run and a real run over
/// the same starting state, which is what makes `--dry-run` output
/// trustworthy.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub stats: RunStats,
    pub renames: Vec<RenameDecision>,
}

/// Processes every export file in a directory.
///
/// An unreadable directory yields an empty report after a warning; a
/// missing export directory is an I/O condition, not a crash.
pub fn process_directory(
    dir: &Path,
    index: &ContactIndex,
    patterns: &ExtractorPatterns,
    opts: &ProcessOptions,
) -> RunReport {
    let mut report = RunReport::default();

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("⚠️  Cannot read directory {}: {}", dir.display(), e);
            return report;
        }
    };

    // Targets assigned earlier in this run; keeps collision suffixes
    // consistent between dry and real runs.
    let mut claimed: HashSet<PathBuf> = HashSet::new();

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file) = ExportFile::from_path(&path) else {
            continue;
        };
        process_file(&file, index, patterns, opts, &mut claimed, &mut report);
    }

    report
}

/// Runs the full pipeline over one export file.
fn process_file(
    file: &ExportFile,
    index: &ContactIndex,
    patterns: &ExtractorPatterns,
    opts: &ProcessOptions,
    claimed: &mut HashSet<PathBuf>,
    report: &mut RunReport,
) {
    let stats = &mut report.stats;

    // Phase 1: rename
    let mut current = file.path.clone();
    if opts.rename && !index.is_empty() {
        let identifiers = raw_identifiers(&file.stem);
        let names = resolve_names(&identifiers, index);

        match plan_rename(&file.path, &names, claimed) {
            None => {
                stats.unmatched += 1;
                if opts.verbose {
                    println!("   🫤 no contact match: {}", display_name_of(&file.path));
                }
            }
            Some(decision) if decision.is_noop() => {
                stats.already_named += 1;
            }
            Some(decision) => {
                claimed.insert(decision.to.clone());
                if opts.verbose {
                    println!(
                        "   ✏️  {} → {}",
                        display_name_of(&decision.from),
                        display_name_of(&decision.to)
                    );
                }
                match apply_rename(&decision, opts.dry_run) {
                    Ok(moved) => {
                        stats.renamed += 1;
                        if moved {
                            current = decision.to.clone();
                        }
                        report.renames.push(decision);
                    }
                    Err(e) => {
                        stats.rename_failed += 1;
                        eprintln!("⚠️  Rename failed for {}: {}", file.path.display(), e);
                    }
                }
            }
        }
    }

    // Phase 2: timestamps, from the possibly-renamed file
    let content = match fs::read_to_string(&current) {
        Ok(content) => content,
        Err(e) => {
            stats.stamp_failed += 1;
            eprintln!("⚠️  Cannot read {}: {}", current.display(), e);
            return;
        }
    };

    let samples = patterns.extract(file.format, &content);
    match date_range(samples) {
        None => {
            stats.no_dates += 1;
            if opts.verbose {
                println!("   📭 no dates found: {}", display_name_of(&current));
            }
        }
        Some(range) => {
            if opts.dry_run {
                stats.stamped += 1;
            } else {
                match apply_range(&current, &range) {
                    Ok(()) => stats.stamped += 1,
                    Err(e) => {
                        stats.stamp_failed += 1;
                        eprintln!("⚠️  Timestamp update failed for {}: {}", current.display(), e);
                    }
                }
            }
        }
    }
}

fn display_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
