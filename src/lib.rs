//! # flightbeam
//!
//! Validating ingestion and ad-hoc querying of flight-schedule records.
//!
//! flightbeam reads comma-delimited flight lines from one file and/or a directory
//! of `*.csv` files, validates every line against a fixed field schema, persists
//! the accepted records as a JSON store with a plain-text error log, and answers
//! filter queries against that store.
//!
//! ## Quick Start
//!
//! ```no_run
//! use flightbeam::*;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let sources = SourceSet { file: Some("flights.csv".into()), dir: Some("more".into()) };
//! let ingestion = ingest_sources(&sources, SourcePolicy::SkipUnreadable)?;
//!
//! let store = Store::new(ingestion.records);
//! store.save("db.json")?;
//! ingestion.errors.write_to_file("errors.txt")?;
//!
//! let queries = load_queries("queries.json")?;
//! save_results("response.json", &run_queries(&store, &queries))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Record rules
//!
//! | field                | rule                                        |
//! |----------------------|---------------------------------------------|
//! | `flight_id`          | 2 to 8 letters or digits                    |
//! | `origin`             | 3 uppercase letters                         |
//! | `destination`        | 3 uppercase letters                         |
//! | `departure_datetime` | `YYYY-MM-DD HH:MM`                          |
//! | `arrival_datetime`   | `YYYY-MM-DD HH:MM`, strictly after departure |
//! | `price`              | positive number                             |
//!
//! A line with the wrong number of fields is rejected with
//! `missing required fields` alone; otherwise every failing rule is reported.
//!
//! ## Module Overview
//!
//! - [`record`] - the `FlightRecord` type and timestamp format
//! - [`validation`] - field validators and the per-line record validator
//! - [`ingest`] - source ordering, line routing and the error log
//! - [`store`] - JSON store persistence
//! - [`query`] - query model and matching engine
//! - [`io`] - source discovery and JSON/text file helpers
//! - [`metrics`] - ingestion counters
//! - [`config`] - run settings
//! - [`testing`] - fixtures and helpers for tests

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ingest;
pub mod io;
pub mod metrics;
pub mod query;
pub mod record;
pub mod store;
pub mod testing;
pub mod validation;

pub use config::Settings;
pub use ingest::{
    ErrorDetail, ErrorEntry, ErrorLog, Ingestion, SourcePolicy, SourceSet, ingest_sources,
    ingest_text,
};
pub use metrics::IngestMetrics;
pub use query::{Query, QueryField, QueryResult, load_queries, run_queries, save_results};
pub use record::{DATE_FORMAT, FlightRecord};
pub use store::Store;
pub use validation::{Reason, RowRejection, validate_flight_row};
