//! The ingestion pipeline.
//!
//! Sources are read in a fixed order (explicit file first, then the `*.csv` files
//! of a directory in name order) and every line is routed through
//! [`validate_flight_row`]. Accepted records and error entries accumulate across
//! all sources in that order.
//!
//! Per source, line numbers start at 1 and:
//! - blank lines are skipped silently
//! - line 1 is a header, skipped silently, when it contains `flight_id`
//! - lines starting with `#` become a `comment` error entry
//! - everything else is validated
//!
//! # Unreadable sources
//!
//! With [`SourcePolicy::SkipUnreadable`] (the default) a source that cannot be
//! opened or read contributes nothing: no records and no error entries. The
//! run continues with the next source. A source is read whole before any of its
//! lines are processed, so a read failure never leaves partial output behind.
//! [`SourcePolicy::FailFast`] turns the same failure into an error.
//!
//! # Example
//!
//! ```
//! use flightbeam::ingest::ingest_text;
//!
//! let text = "flight_id,origin,destination,dep,arr,price\n\
//!             AB12,JFK,LAX,2024-01-01 08:00,2024-01-01 10:00,100\n\
//!             ## paused\n";
//! let out = ingest_text(text);
//! assert_eq!(out.records.len(), 1);
//! assert_eq!(out.errors.lines(), vec!["Line 3: # paused -> comment"]);
//! ```

use crate::io::glob::discover_sources;
use crate::io::json::write_lines;
use crate::metrics::IngestMetrics;
use crate::record::FlightRecord;
use crate::validation::{RowRejection, validate_flight_row};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Substring that marks line 1 of a source as a header.
pub const HEADER_MARKER: &str = "flight_id";

/// Prefix of a comment line.
pub const COMMENT_PREFIX: char = '#';

/// What to do when a source cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourcePolicy {
    /// Drop the source and carry on with the next one
    #[default]
    SkipUnreadable,
    /// Stop ingestion with an error
    FailFast,
}

/// Why a line ended up in the error log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDetail {
    Comment,
    Rejected(RowRejection),
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comment => f.write_str("comment"),
            Self::Rejected(rejection) => write!(f, "{rejection}"),
        }
    }
}

/// One error-log entry: the line number within its source, the trimmed line
/// text and why it was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    pub line_number: usize,
    pub line: String,
    pub detail: ErrorDetail,
}

impl fmt::Display for ErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {} -> {}", self.line_number, self.line, self.detail)
    }
}

/// Error entries in the order they were produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorLog {
    entries: Vec<ErrorEntry>,
}

impl ErrorLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ErrorEntry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }

    /// Each entry rendered as an error-log line.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// Write the log to `path`, one entry per line.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<usize> {
        write_lines(path, &self.lines())
    }
}

/// Everything one ingestion run produced.
#[derive(Debug, Clone, Default)]
pub struct Ingestion {
    pub records: Vec<FlightRecord>,
    pub errors: ErrorLog,
    pub metrics: IngestMetrics,
}

impl Ingestion {
    /// Route every line of one source's text.
    pub fn push_text(&mut self, text: &str) {
        for (idx, raw) in text.lines().enumerate() {
            let line_number = idx + 1;
            let line = raw.trim();

            if line.is_empty() || (line_number == 1 && line.contains(HEADER_MARKER)) {
                self.metrics.record_ignored();
                continue;
            }

            if line.starts_with(COMMENT_PREFIX) {
                debug!(line_number, "comment line");
                self.metrics.record_comment();
                self.errors.push(ErrorEntry {
                    line_number,
                    line: line.to_string(),
                    detail: ErrorDetail::Comment,
                });
                continue;
            }

            match validate_flight_row(raw, line_number) {
                Ok(record) => {
                    self.metrics.record_accepted();
                    self.records.push(record);
                }
                Err(rejection) => {
                    self.metrics.record_rejected();
                    self.errors.push(ErrorEntry {
                        line_number,
                        line: line.to_string(),
                        detail: ErrorDetail::Rejected(rejection),
                    });
                }
            }
        }
    }

    /// Read one source file and route its lines.
    ///
    /// # Errors
    /// Only with [`SourcePolicy::FailFast`], when the file cannot be read.
    pub fn push_file(&mut self, path: impl AsRef<Path>, policy: SourcePolicy) -> Result<()> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                info!(source = %path.display(), "ingesting source");
                self.metrics.record_source_read();
                self.push_text(&text);
                Ok(())
            }
            Err(err) => match policy {
                SourcePolicy::SkipUnreadable => {
                    warn!(source = %path.display(), error = %err, "skipping unreadable source");
                    self.metrics.record_source_skipped();
                    Ok(())
                }
                SourcePolicy::FailFast => {
                    Err(err).with_context(|| format!("read source {}", path.display()))
                }
            },
        }
    }
}

/// Where to ingest from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSet {
    /// Explicit source, processed first.
    pub file: Option<PathBuf>,
    /// Directory whose `*.csv` files are processed in name order.
    pub dir: Option<PathBuf>,
}

impl SourceSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.file.is_none() && self.dir.is_none()
    }

    /// The source files in processing order.
    ///
    /// # Errors
    /// Only with [`SourcePolicy::FailFast`], when the directory cannot be listed.
    pub fn resolve(&self, policy: SourcePolicy) -> Result<Vec<PathBuf>> {
        let mut out: Vec<PathBuf> = self.file.iter().cloned().collect();
        if let Some(dir) = &self.dir {
            match discover_sources(dir) {
                Ok(found) => out.extend(found),
                Err(err) if policy == SourcePolicy::SkipUnreadable => {
                    warn!(dir = %dir.display(), error = %err, "skipping unlistable directory");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(out)
    }
}

/// Ingest every source of `sources` in order.
///
/// # Errors
/// Only with [`SourcePolicy::FailFast`]; see [`Ingestion::push_file`].
pub fn ingest_sources(sources: &SourceSet, policy: SourcePolicy) -> Result<Ingestion> {
    let mut out = Ingestion::default();
    for path in sources.resolve(policy)? {
        out.push_file(&path, policy)?;
    }
    out.metrics.log_summary();
    Ok(out)
}

/// Ingest a single in-memory source.
#[must_use]
pub fn ingest_text(text: &str) -> Ingestion {
    let mut out = Ingestion::default();
    out.push_text(text);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Reason;

    #[test]
    fn header_only_recognized_on_line_one() {
        let text = "\n\
                    flight_id,origin\n";
        let out = ingest_text(text);
        assert!(out.records.is_empty());
        assert_eq!(out.errors.lines(), vec!["Line 2: flight_id,origin -> missing required fields"]);
    }

    #[test]
    fn blank_and_whitespace_lines_are_silent() {
        let out = ingest_text("   \n\t\n");
        assert!(out.records.is_empty());
        assert!(out.errors.is_empty());
        assert_eq!(out.metrics.ignored, 2);
    }

    #[test]
    fn comment_after_trim_is_logged() {
        let out = ingest_text("  # note ,x\n");
        assert_eq!(out.errors.lines(), vec!["Line 1: # note ,x -> comment"]);
        assert_eq!(out.errors.entries()[0].detail, ErrorDetail::Comment);
    }

    #[test]
    fn rejection_entry_uses_trimmed_line() {
        let out = ingest_text("  AB12,JFK,LAX,2024-01-01 10:00,2024-01-01 08:00,100  \r\n");
        let entry = &out.errors.entries()[0];
        assert_eq!(entry.line, "AB12,JFK,LAX,2024-01-01 10:00,2024-01-01 08:00,100");
        match &entry.detail {
            ErrorDetail::Rejected(r) => assert!(r.contains(Reason::ArrivalNotAfterDeparture)),
            ErrorDetail::Comment => panic!("expected rejection"),
        }
    }

    #[test]
    fn unreadable_source_is_skipped_by_default() -> Result<()> {
        let mut out = Ingestion::default();
        out.push_file("/definitely/not/here.csv", SourcePolicy::SkipUnreadable)?;
        assert!(out.records.is_empty());
        assert!(out.errors.is_empty());
        assert_eq!(out.metrics.sources_skipped, 1);
        Ok(())
    }

    #[test]
    fn unreadable_source_fails_when_asked() {
        let mut out = Ingestion::default();
        let err = out
            .push_file("/definitely/not/here.csv", SourcePolicy::FailFast)
            .unwrap_err();
        assert!(err.to_string().contains("here.csv"));
    }

    #[test]
    fn policy_names_in_config() {
        let p: SourcePolicy = serde_json::from_str("\"fail_fast\"").unwrap();
        assert_eq!(p, SourcePolicy::FailFast);
        assert_eq!(SourcePolicy::default(), SourcePolicy::SkipUnreadable);
    }
}
