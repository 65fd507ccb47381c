//! Error types for trade log analysis.

use std::path::PathBuf;

/// Reasons a log line is not a trade record.
///
/// These never abort a run: the analyzer logs the reason and drops the line.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// Line bytes are not valid UTF-8.
    #[error("line is not valid UTF-8")]
    Encoding,
    /// Fewer than the six `;`-separated fields.
    #[error("expected at least 6 fields, found {0}")]
    TooFewFields(usize),
    /// Side field is not exactly `buy` or `sell`.
    #[error(transparent)]
    Side(#[from] crate::side::ParseSideError),
    /// Unit price is not a finite, non-negative decimal.
    #[error("invalid unit price '{0}'")]
    Price(String),
    /// Volume is not a non-negative integer.
    #[error("invalid volume '{0}'")]
    Volume(String),
}

/// All errors that can abort a tradelog run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid datetime '{0}' (expected YYYY-mm-dd HH:MM:SS)")]
    InvalidDateTime(String),

    #[error("only one command may be given, found '{first}' and '{second}'")]
    MultipleCommands { first: String, second: String },

    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read input: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to write output: {0}")]
    Write(std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
