//! JSON document and plain-text line I/O.
//!
//! Stores, query results and settings are single indented JSON documents; the
//! error log is newline-terminated text. Writers create parent directories as
//! needed.

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::ser::PrettyFormatter;
use std::fs::{File, create_dir_all};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

const INDENT: &[u8] = b"    ";

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
    }
    Ok(())
}

/// Read one JSON document from `path` into `T`.
///
/// # Errors
/// Returns an error if the file cannot be opened or does not decode into `T`.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse JSON document {}", path.display()))
}

/// Write `value` to `path` as an indented JSON document.
///
/// # Errors
/// Returns an error if the file/dirs cannot be created or serialization fails.
pub fn write_json_pretty<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    let mut ser = serde_json::Serializer::with_formatter(&mut w, PrettyFormatter::with_indent(INDENT));
    value
        .serialize(&mut ser)
        .with_context(|| format!("serialize JSON to {}", path.display()))?;
    w.flush()?;
    Ok(())
}

/// Write each line followed by `\n`.
///
/// # Returns
/// The number of lines written.
///
/// # Errors
/// Returns an error if the file/dirs cannot be created or written.
pub fn write_lines<S: AsRef<str>>(path: impl AsRef<Path>, lines: &[S]) -> Result<usize> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    for line in lines {
        w.write_all(line.as_ref().as_bytes())?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(lines.len())
}
