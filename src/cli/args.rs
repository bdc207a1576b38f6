//! CLI argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

/// Validate flight-schedule files into a JSON store and query it
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "flightbeam")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Source file to ingest (processed before the directory)
    #[arg(short = 'i', long)]
    pub input: Option<PathBuf>,

    /// Directory whose *.csv files are ingested in name order
    #[arg(short = 'd', long)]
    pub directory: Option<PathBuf>,

    /// Where to save the ingested store [default: db.json]
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Load this store instead of ingesting sources
    #[arg(short = 'j', long = "json-db")]
    pub json_db: Option<PathBuf>,

    /// Query file: one JSON object or an array of objects
    #[arg(short = 'q', long)]
    pub query: Option<PathBuf>,

    /// Where to write query results [default: generated name in the response directory]
    #[arg(long)]
    pub response: Option<PathBuf>,

    /// Where to save the error log [default: errors.txt]
    #[arg(long)]
    pub errors: Option<PathBuf>,

    /// Identifier embedded in generated response file names
    #[arg(long)]
    pub requester_id: Option<String>,

    /// Stop on the first unreadable source instead of skipping it
    #[arg(long)]
    pub fail_fast: bool,

    /// JSON settings file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_flags_map_to_fields() {
        let cli = Cli::try_parse_from([
            "flightbeam", "-i", "a.csv", "-d", "dir", "-o", "db.json", "-q", "q.json",
        ])
        .unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("a.csv")));
        assert_eq!(cli.directory, Some(PathBuf::from("dir")));
        assert_eq!(cli.output, Some(PathBuf::from("db.json")));
        assert_eq!(cli.query, Some(PathBuf::from("q.json")));
        assert!(!cli.fail_fast);
    }

    #[test]
    fn long_flags() {
        let cli = Cli::try_parse_from([
            "flightbeam",
            "--json-db",
            "db.json",
            "--requester-id",
            "ops",
            "--fail-fast",
        ])
        .unwrap();
        assert_eq!(cli.json_db, Some(PathBuf::from("db.json")));
        assert_eq!(cli.requester_id.as_deref(), Some("ops"));
        assert!(cli.fail_fast);
    }

    #[test]
    fn no_flags_parse_to_empty() {
        assert_eq!(Cli::try_parse_from(["flightbeam"]).unwrap(), Cli::default());
    }
}
