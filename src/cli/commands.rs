//! CLI command implementation.

use std::io::Write;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::config::Settings;
use crate::ingest::{SourcePolicy, SourceSet, ingest_sources};
use crate::metrics::IngestMetrics;
use crate::query::{load_queries, run_queries, save_results};
use crate::store::Store;

use super::args::Cli;
use super::errors::{CliError, CliResult};

/// Printed when a store is loaded and there is nothing to query.
pub const NO_QUERY_NOTICE: &str = "Loaded JSON DB; no queries executed.";

/// What one invocation did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Set when sources were ingested.
    pub ingest: Option<IngestMetrics>,
    pub records: usize,
    /// Where query results were written, if a query file was given.
    pub response: Option<PathBuf>,
}

/// Main CLI entry point.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let stdout = std::io::stdout();
    execute(&cli, Local::now().naive_local(), &mut stdout.lock())?;
    Ok(())
}

/// Settings file (if any) with command-line overrides applied.
pub fn resolve_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path).map_err(CliError::config)?,
        None => Settings::default(),
    };
    if let Some(output) = &cli.output {
        settings.db_path = output.clone();
    }
    if let Some(errors) = &cli.errors {
        settings.errors_path = errors.clone();
    }
    if let Some(id) = &cli.requester_id {
        settings.requester_id = id.clone();
        settings.validate().map_err(CliError::config)?;
    }
    if cli.fail_fast {
        settings.source_policy = SourcePolicy::FailFast;
    }
    Ok(settings)
}

/// Run one invocation. `now` names generated response files; notices go to `out`.
pub fn execute(cli: &Cli, now: NaiveDateTime, out: &mut impl Write) -> CliResult<RunSummary> {
    let settings = resolve_settings(cli)?;
    let mut summary = RunSummary::default();

    let store = if let Some(db) = &cli.json_db {
        Store::load(db).map_err(CliError::io)?
    } else {
        let sources = SourceSet {
            file: cli.input.clone(),
            dir: cli.directory.clone(),
        };
        if sources.is_empty() {
            return Err(CliError::no_input());
        }

        let ingestion = ingest_sources(&sources, settings.source_policy).map_err(CliError::io)?;
        let store = Store::new(ingestion.records);
        store.save(&settings.db_path).map_err(CliError::io)?;
        ingestion
            .errors
            .write_to_file(&settings.errors_path)
            .map_err(CliError::io)?;
        info!(
            store = %settings.db_path.display(),
            errors = %settings.errors_path.display(),
            "{}",
            ingestion.metrics
        );
        summary.ingest = Some(ingestion.metrics);
        store
    };
    summary.records = store.len();

    match &cli.query {
        Some(query_path) => {
            let queries = load_queries(query_path).map_err(CliError::io)?;
            let results = run_queries(&store, &queries);
            let path = cli
                .response
                .clone()
                .unwrap_or_else(|| settings.response_path(now));
            save_results(&path, &results).map_err(CliError::io)?;
            summary.response = Some(path);
        }
        None if cli.json_db.is_some() => writeln!(out, "{NO_QUERY_NOTICE}")?,
        None => {}
    }

    Ok(summary)
}
