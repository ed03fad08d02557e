//! Message date extraction from export file content.
//!
//! Export files carry message timestamps in several textual shapes
//! depending on format. This module compiles every matching pattern once
//! at startup ([`ExtractorPatterns::new`] fails fast on an invalid
//! pattern) and extracts an ordered sequence of date samples from file
//! content.
//!
//! Two deliberately distinct strategies exist, one per format:
//!
//! - [`ExtractionStrategy::FirstMatchingPattern`] (plain text): patterns
//!   are tried in priority order and the first one that matches at all is
//!   used exclusively.
//! - [`ExtractionStrategy::AllPatternsUnion`] (HTML): every pattern runs
//!   and all matches are unioned.
//!
//! The asymmetry is intentional and preserved; do not unify the two.
//!
//! Individual matches that fail to parse into a time value are silently
//! dropped. Naive timestamps are interpreted with the local clock offset
//! at parse time.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use regex::Regex;

use crate::cli::ExportFormat;
use crate::error::{Result, TidyError};

/// A single parsed message timestamp.
pub type DateSample = DateTime<Local>;

/// The first and last message times found in a file.
///
/// Only defined for a non-empty sample sequence; see [`date_range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Earliest sample (first message time)
    pub first: DateSample,
    /// Latest sample (last message time)
    pub last: DateSample,
}

/// How patterns combine for a given format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Try patterns in priority order; the first with any match wins
    /// exclusively, even when all its matches fail to parse.
    FirstMatchingPattern,
    /// Run every pattern and union all matches.
    AllPatternsUnion,
}

impl ExportFormat {
    /// Returns the extraction strategy for this format.
    pub fn strategy(self) -> ExtractionStrategy {
        match self {
            ExportFormat::Txt => ExtractionStrategy::FirstMatchingPattern,
            ExportFormat::Html => ExtractionStrategy::AllPatternsUnion,
        }
    }
}

const MONTH: &str = "(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)";

/// All matching patterns, compiled once at startup.
#[derive(Debug)]
pub struct ExtractorPatterns {
    // Plain text, in priority order
    text_anchored: Regex,
    text_anywhere: Regex,
    text_iso_bracketed: Regex,
    text_iso_bare: Regex,
    // HTML, all applied
    html_datetime_attr: Regex,
    html_timestamp_class: Regex,
    html_iso_bare: Regex,
    html_long_form: Regex,
    // Applied to the captured content of a timestamp-class element
    content_timestamp: Regex,
}

impl ExtractorPatterns {
    /// Compiles every pattern, failing fast on the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns [`TidyError::Pattern`] naming the pattern that failed.
    pub fn new() -> Result<Self> {
        let month_date = format!(r"({MONTH} \d{{1,2}}, \d{{4}})");
        let clock = r"(\d{1,2}:\d{2}:\d{2} (?:AM|PM))";
        let iso = r"(\d{4}-\d{2}-\d{2})[ T](\d{2}:\d{2}:\d{2})";

        Ok(Self {
            text_anchored: compile(
                "text line-anchored timestamp",
                &format!(r"(?m)^{month_date}\s+{clock}"),
            )?,
            text_anywhere: compile(
                "text unanchored timestamp",
                &format!(r"{month_date}\s+{clock}"),
            )?,
            text_iso_bracketed: compile("text bracketed ISO", &format!(r"\[{iso}\]"))?,
            text_iso_bare: compile("text bare ISO", iso)?,
            html_datetime_attr: compile("html datetime attribute", r#"datetime="([^"]+)""#)?,
            html_timestamp_class: compile(
                "html timestamp class",
                r#"class="[^"]*timestamp[^"]*"[^>]*>\s*([^<]+)"#,
            )?,
            html_iso_bare: compile("html bare ISO", iso)?,
            html_long_form: compile(
                "html long-form timestamp",
                &format!(r"{month_date} at {clock}"),
            )?,
            content_timestamp: compile(
                "timestamp element content",
                &format!(r"{month_date}(?:\s+at)?\s+{clock}"),
            )?,
        })
    }

    /// Extracts every date sample from file content, using the strategy
    /// belonging to the format.
    pub fn extract(&self, format: ExportFormat, content: &str) -> Vec<DateSample> {
        match format.strategy() {
            ExtractionStrategy::FirstMatchingPattern => self.extract_text(content),
            ExtractionStrategy::AllPatternsUnion => self.extract_html(content),
        }
    }

    /// Plain-text extraction: first pattern with any match wins.
    fn extract_text(&self, content: &str) -> Vec<DateSample> {
        let candidates: [(&Regex, fn(&str, &str) -> Option<DateSample>); 4] = [
            (&self.text_anchored, parse_month_day),
            (&self.text_anywhere, parse_month_day),
            (&self.text_iso_bracketed, parse_iso),
            (&self.text_iso_bare, parse_iso),
        ];

        for (pattern, parse) in candidates {
            let (matched, samples) = collect_pairs(pattern, content, parse);
            if matched {
                return samples;
            }
        }

        Vec::new()
    }

    /// HTML extraction: all matches of all patterns, unioned.
    fn extract_html(&self, content: &str) -> Vec<DateSample> {
        let mut samples = Vec::new();

        for caps in self.html_datetime_attr.captures_iter(content) {
            if let Some(value) = caps.get(1) {
                if let Some(dt) = parse_datetime_attr(value.as_str()) {
                    samples.push(dt);
                }
            }
        }

        for caps in self.html_timestamp_class.captures_iter(content) {
            let Some(text) = caps.get(1) else { continue };
            // The element body may carry trailing annotations (read
            // receipts, edits); pull the timestamp out of the middle.
            if let Some(inner) = self.content_timestamp.captures(text.as_str()) {
                if let (Some(d), Some(t)) = (inner.get(1), inner.get(2)) {
                    if let Some(dt) = parse_month_day(d.as_str(), t.as_str()) {
                        samples.push(dt);
                    }
                }
            }
        }

        let (_, iso_samples) = collect_pairs(&self.html_iso_bare, content, parse_iso);
        samples.extend(iso_samples);

        let (_, long_samples) = collect_pairs(&self.html_long_form, content, parse_month_day);
        samples.extend(long_samples);

        samples
    }
}

fn compile(name: &'static str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| TidyError::pattern(name, e))
}

/// Runs a two-group (date, time) pattern over content.
///
/// Returns whether the pattern matched at all, separately from the parsed
/// samples: match-without-parse still counts as a match for the
/// first-matching-pattern policy.
fn collect_pairs(
    pattern: &Regex,
    content: &str,
    parse: fn(&str, &str) -> Option<DateSample>,
) -> (bool, Vec<DateSample>) {
    let mut matched = false;
    let mut samples = Vec::new();

    for caps in pattern.captures_iter(content) {
        matched = true;
        if let (Some(date), Some(time)) = (caps.get(1), caps.get(2)) {
            if let Some(dt) = parse(date.as_str(), time.as_str()) {
                samples.push(dt);
            }
        }
    }

    (matched, samples)
}

/// Parses `"Nov 28, 2024"` + `"11:46:34 AM"` with the local offset.
fn parse_month_day(date: &str, time: &str) -> Option<DateSample> {
    let naive =
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%b %d, %Y %I:%M:%S %p").ok()?;
    Local.from_local_datetime(&naive).single()
}

/// Parses `"2024-11-28"` + `"11:46:34"` with the local offset.
fn parse_iso(date: &str, time: &str) -> Option<DateSample> {
    let naive =
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S").ok()?;
    Local.from_local_datetime(&naive).single()
}

/// Parses a `datetime="…"` attribute value.
///
/// Tried first as a strict timezone-aware RFC 3339 timestamp, then as a
/// naive fallback format using the local offset.
fn parse_datetime_attr(value: &str) -> Option<DateSample> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local));
    }
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").ok()?;
    Local.from_local_datetime(&naive).single()
}

/// Computes the date range of a sample sequence.
///
/// Returns `None` for an empty sequence; callers must leave such files
/// untouched. Otherwise samples are sorted ascending and the extremes
/// become the first/last message times.
pub fn date_range(mut samples: Vec<DateSample>) -> Option<DateRange> {
    if samples.is_empty() {
        return None;
    }
    samples.sort_unstable();
    Some(DateRange {
        first: samples[0],
        last: samples[samples.len() - 1],
    })
}
