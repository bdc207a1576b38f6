//! Command-line front end.
//!
//! One invocation either ingests sources (`-i`, `-d`) into a store and error
//! log, or loads a pre-built store (`-j`), then optionally runs a query file
//! (`-q`) against it.

mod args;
mod commands;
mod errors;

pub use args::Cli;
pub use commands::{NO_QUERY_NOTICE, RunSummary, execute, resolve_settings, run};
pub use errors::{CliError, CliErrorCode, CliResult};
