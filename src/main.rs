//! flightbeam CLI entry point.
//!
//! Installs the log subscriber, hands off to [`flightbeam::cli::run`] and exits
//! non-zero on failure.

use flightbeam::cli;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = cli::run() {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }
}
