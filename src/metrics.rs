//! Ingestion counters.
//!
//! [`IngestMetrics`] is filled in by the ingestion pipeline as it walks the
//! sources and can be logged or exported as JSON afterwards.
//!
//! ```
//! use flightbeam::metrics::IngestMetrics;
//!
//! let mut m = IngestMetrics::default();
//! m.record_accepted();
//! m.record_rejected();
//! assert_eq!(m.lines_processed(), 2);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Counts gathered while ingesting one batch of sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestMetrics {
    pub sources_read: usize,
    pub sources_skipped: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub comments: usize,
    /// Blank lines and header lines.
    pub ignored: usize,
}

impl IngestMetrics {
    pub fn record_source_read(&mut self) {
        self.sources_read += 1;
    }

    pub fn record_source_skipped(&mut self) {
        self.sources_skipped += 1;
    }

    pub fn record_accepted(&mut self) {
        self.accepted += 1;
    }

    pub fn record_rejected(&mut self) {
        self.rejected += 1;
    }

    pub fn record_comment(&mut self) {
        self.comments += 1;
    }

    pub fn record_ignored(&mut self) {
        self.ignored += 1;
    }

    /// Lines that produced either a record or an error entry.
    #[must_use]
    pub fn lines_processed(&self) -> usize {
        self.accepted + self.rejected + self.comments
    }

    /// Add another batch's counts into this one.
    pub fn merge(&mut self, other: &Self) {
        self.sources_read += other.sources_read;
        self.sources_skipped += other.sources_skipped;
        self.accepted += other.accepted;
        self.rejected += other.rejected;
        self.comments += other.comments;
        self.ignored += other.ignored;
    }

    /// Export the counters as pretty JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Emit the counters as a single `info` event.
    pub fn log_summary(&self) {
        info!(
            sources_read = self.sources_read,
            sources_skipped = self.sources_skipped,
            accepted = self.accepted,
            rejected = self.rejected,
            comments = self.comments,
            ignored = self.ignored,
            "ingestion finished"
        );
    }
}

impl fmt::Display for IngestMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} accepted, {} rejected, {} comments from {} sources ({} skipped)",
            self.accepted, self.rejected, self.comments, self.sources_read, self.sources_skipped
        )
    }
}
