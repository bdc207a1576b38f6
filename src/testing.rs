//! Testing utilities for flightbeam.
//!
//! - **Fixtures**: canned lines, sources and records
//! - **Mock I/O**: temporary source files and directories
//! - **Assertions**: compare records, rejection reasons and error logs
//!
//! ```
//! use flightbeam::ingest::ingest_text;
//! use flightbeam::testing::*;
//!
//! let out = ingest_text(&mixed_source());
//! assert_records_equal(&out.records, &sample_records()[..2]);
//! assert_eq!(out.errors.len(), 3);
//! ```

pub mod assertions;
pub mod fixtures;
pub mod mock_io;

pub use assertions::*;
pub use fixtures::*;
pub use mock_io::*;
