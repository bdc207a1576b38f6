//! Run settings.
//!
//! Settings come from an optional JSON file; every field has a default, so an
//! empty object (or no file at all) is valid. Command-line flags override
//! whatever the file says.
//!
//! ```json
//! {
//!     "db_path": "out/db.json",
//!     "errors_path": "out/errors.txt",
//!     "response_dir": "out",
//!     "requester_id": "ops-team",
//!     "source_policy": "skip_unreadable"
//! }
//! ```

use crate::ingest::SourcePolicy;
use crate::io::json::read_json;
use anyhow::{Result, bail};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_PATH: &str = "db.json";
pub const DEFAULT_ERRORS_PATH: &str = "errors.txt";
pub const DEFAULT_REQUESTER_ID: &str = "anonymous";

/// Timestamp layout embedded in generated response file names.
const RESPONSE_STAMP: &str = "%Y%m%d_%H%M";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Where an ingested store is saved
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Where the error log of an ingestion run is saved
    #[serde(default = "default_errors_path")]
    pub errors_path: PathBuf,

    /// Directory for generated query-response files
    #[serde(default = "default_response_dir")]
    pub response_dir: PathBuf,

    /// Identifier embedded in generated query-response file names
    #[serde(default = "default_requester_id")]
    pub requester_id: String,

    #[serde(default)]
    pub source_policy: SourcePolicy,
}

fn default_db_path() -> PathBuf {
    PathBuf::from(DEFAULT_DB_PATH)
}
fn default_errors_path() -> PathBuf {
    PathBuf::from(DEFAULT_ERRORS_PATH)
}
fn default_response_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_requester_id() -> String {
    DEFAULT_REQUESTER_ID.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            errors_path: default_errors_path(),
            response_dir: default_response_dir(),
            requester_id: default_requester_id(),
            source_policy: SourcePolicy::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid JSON, has
    /// unknown keys, or fails [`Settings::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let settings: Self = read_json(path)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check values that would otherwise only fail late.
    ///
    /// # Errors
    /// Returns an error if the requester id is empty or contains characters that
    /// do not belong in a file name.
    pub fn validate(&self) -> Result<()> {
        if self.requester_id.is_empty() {
            bail!("requester_id must not be empty");
        }
        if let Some(bad) = self
            .requester_id
            .chars()
            .find(|c| !(c.is_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            bail!("requester_id contains {bad:?}; use letters, digits, '-', '_' or '.'");
        }
        Ok(())
    }

    /// Path for a query-response file generated at `now`.
    #[must_use]
    pub fn response_path(&self, now: NaiveDateTime) -> PathBuf {
        self.response_dir
            .join(response_file_name(&self.requester_id, now))
    }
}

/// `response_{requester_id}_{YYYYMMDD_HHMM}.json`
#[must_use]
pub fn response_file_name(requester_id: &str, now: NaiveDateTime) -> String {
    format!("response_{requester_id}_{}.json", now.format(RESPONSE_STAMP))
}
