//! Temporary source files, directories and stores.

use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

/// A temporary file that is deleted when dropped.
pub struct TempFilePath {
    #[allow(dead_code)]
    temp_file: NamedTempFile,
    path: PathBuf,
}

impl TempFilePath {
    /// Create a new temporary file with a specific extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created.
    pub fn with_extension(extension: &str) -> std::io::Result<Self> {
        let temp_file = tempfile::Builder::new()
            .suffix(&format!(".{extension}"))
            .tempfile()?;
        let path = temp_file.path().to_path_buf();
        Ok(Self { temp_file, path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A temporary directory of sources and outputs, deleted when dropped.
pub struct TempSourceDir {
    #[allow(dead_code)]
    temp_dir: TempDir,
    path: PathBuf,
}

impl TempSourceDir {
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().to_path_buf();
        Ok(Self { temp_dir, path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A path inside the directory; nothing is created.
    #[must_use]
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Write `text` to `name` inside the directory and return its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn add_source(&self, name: &str, text: &str) -> std::io::Result<PathBuf> {
        let path = self.file_path(name);
        std::fs::write(&path, text)?;
        Ok(path)
    }
}

/// Write `text` to a fresh temporary `.csv` file.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created or written.
///
/// # Example
///
/// ```
/// use flightbeam::testing::{mock_source_file, VALID_LINE};
/// use flightbeam::ingest::{Ingestion, SourcePolicy};
///
/// let src = mock_source_file(VALID_LINE).unwrap();
/// let mut out = Ingestion::default();
/// out.push_file(src.path(), SourcePolicy::FailFast).unwrap();
/// assert_eq!(out.records.len(), 1);
/// ```
pub fn mock_source_file(text: &str) -> std::io::Result<TempFilePath> {
    let temp = TempFilePath::with_extension("csv")?;
    std::fs::write(temp.path(), text)?;
    Ok(temp)
}
