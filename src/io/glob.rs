//! Source discovery for directory ingestion.
//!
//! A directory contributes every `*.csv` file directly inside it, in
//! lexicographic path order so repeated runs ingest sources identically.
//!
//! # Examples
//!
//! ```no_run
//! use flightbeam::io::glob::discover_sources;
//!
//! let files = discover_sources("schedules")?;
//! # use anyhow::Error; Ok::<(), Error>(())
//! ```

use anyhow::{Context, Result};
use glob::{Pattern, glob};
use std::path::{Path, PathBuf};

/// File pattern matched inside a source directory.
pub const SOURCE_PATTERN: &str = "*.csv";

/// Expand a glob pattern into a sorted vector of matching file paths.
///
/// Directories that match the pattern are left out.
///
/// # Errors
///
/// Returns an error if the pattern is invalid or a matched entry cannot be read.
/// No matches is an empty vector, not an error.
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;

    let mut result = Vec::new();
    for entry in paths {
        let path =
            entry.with_context(|| format!("error reading glob entry for pattern: {pattern}"))?;
        if path.is_file() {
            result.push(path);
        }
    }

    result.sort();
    Ok(result)
}

/// List the `*.csv` sources in `dir`, sorted by file name.
///
/// Glob metacharacters in the directory name are escaped, so a directory called
/// `runs[1]` is treated literally.
///
/// # Errors
///
/// Returns an error if the directory path is not valid UTF-8 or globbing fails.
pub fn discover_sources(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let dir_str = dir
        .to_str()
        .with_context(|| format!("source directory is not valid UTF-8: {}", dir.display()))?;
    let pattern = Path::new(&Pattern::escape(dir_str)).join(SOURCE_PATTERN);
    let pattern = pattern
        .to_str()
        .with_context(|| format!("bad source pattern for {}", dir.display()))?;
    expand_glob(pattern)
}
