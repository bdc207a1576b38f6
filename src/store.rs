//! Persisted store of accepted records.
//!
//! The on-disk form is an indented JSON array of flight objects. Loading trusts
//! the document and does not re-run validation.

use crate::io::json::{read_json, write_json_pretty};
use crate::record::FlightRecord;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Ordered sequence of accepted records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Store {
    records: Vec<FlightRecord>,
}

impl Store {
    #[must_use]
    pub fn new(records: Vec<FlightRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<FlightRecord> {
        self.records
    }

    /// Load a store document.
    ///
    /// # Errors
    /// Returns an error if the file is missing or is not an array of flight objects.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let store: Self = read_json(path)?;
        info!(path = %path.display(), records = store.len(), "loaded store");
        Ok(store)
    }

    /// Save as an indented JSON array.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        write_json_pretty(path, self)?;
        info!(path = %path.display(), records = self.len(), "saved store");
        Ok(())
    }
}

impl From<Vec<FlightRecord>> for Store {
    fn from(records: Vec<FlightRecord>) -> Self {
        Self::new(records)
    }
}
