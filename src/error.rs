//! Error types shared by the store, history and session layers

use std::path::PathBuf;

use thiserror::Error;

/// Result type for event log operations
pub type LogResult<T> = Result<T, LogError>;

/// Errors that can occur while reading or mutating the event log
#[derive(Debug, Error)]
pub enum LogError {
    /// The log file is missing or cannot be opened for reading.
    #[error("log file unavailable: {}", path.display())]
    StorageUnavailable { path: PathBuf },

    /// Positional access outside the current sequence.
    #[error("index {index} out of range for log of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    /// Only alphabetic keys are recorded.
    #[error("key {0:?} is not alphabetic")]
    InvalidKey(char),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A timestamp could not be decoded.
///
/// The store never surfaces this: lines that fail to parse sort last.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected at least 3 colon-separated components, found {0}")]
    TooFewComponents(usize),

    #[error("component {0:?} is not an unsigned integer")]
    InvalidComponent(String),

    #[error("timestamp {0:?} is too large")]
    Overflow(String),

    #[error("line has no timestamp field")]
    MissingTimestamp,
}
