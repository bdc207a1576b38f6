//! CLI-specific error types.
//!
//! Every CLI error ends the run with exit code 1.

use std::fmt;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Nothing to ingest and no store to load
    Usage,
    /// Settings file error
    Config,
    /// Reading or writing a store, query or error file
    Io,
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usage => "usage",
            Self::Config => "config",
            Self::Io => "io",
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn no_input() -> Self {
        Self::new(CliErrorCode::Usage, "provide -i, -d, or -j")
    }

    /// Settings error, keeping the whole context chain.
    pub fn config(err: anyhow::Error) -> Self {
        Self::new(CliErrorCode::Config, format!("{err:#}"))
    }

    /// I/O error, keeping the whole context chain.
    pub fn io(err: anyhow::Error) -> Self {
        Self::new(CliErrorCode::Io, format!("{err:#}"))
    }

    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(CliErrorCode::Io, e.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn display_prefixes_code() {
        assert_eq!(CliError::no_input().to_string(), "usage: provide -i, -d, or -j");
    }

    #[test]
    fn context_chain_is_kept() {
        let err: anyhow::Result<()> = Err(anyhow::anyhow!("EOF while parsing")).context("open db.json");
        let cli = CliError::io(err.unwrap_err());
        assert_eq!(cli.code(), CliErrorCode::Io);
        assert_eq!(cli.message(), "open db.json: EOF while parsing");
    }
}
