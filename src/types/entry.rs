//! Log entries and the stored lines that carry them

use std::fmt;

use super::{CanonicalTime, SortKey};
use crate::codec::{format_timestamp, line_sort_key, parse_timestamp, split_line};

/// One key press annotated with its video time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEntry {
    pub key: char,
    pub timestamp: CanonicalTime,
}

impl LogEntry {
    pub fn new(key: char, timestamp: CanonicalTime) -> Self {
        Self { key, timestamp }
    }

    /// Render in the canonical `HH:MM:SS:mmm, k` form
    pub fn to_line(&self) -> LogLine {
        LogLine::new(format!("{}, {}", format_timestamp(self.timestamp), self.key))
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", format_timestamp(self.timestamp), self.key)
    }
}

/// A non-blank line of the log file, held verbatim without its newline.
///
/// Legacy `k: HH:MM:SS` lines and lines that do not parse at all are kept
/// as-is so that sorting, deletion and undo never rewrite them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogLine(String);

impl LogLine {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self(text.trim_end_matches(['\r', '\n']).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn sort_key(&self) -> SortKey {
        line_sort_key(&self.0)
    }

    /// Exact-text identity used to re-locate a line after a sort
    pub fn matches(&self, other: &LogLine) -> bool {
        self.0.trim() == other.0.trim()
    }

    /// Recover the entry if the line has a parsable timestamp and a
    /// single-character key, in either the canonical or the legacy layout.
    pub fn entry(&self) -> Option<LogEntry> {
        let (timestamp, key) = split_line(&self.0)?;
        let timestamp = parse_timestamp(timestamp).ok()?;
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(key), None) => Some(LogEntry::new(key, timestamp)),
            _ => None,
        }
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<LogEntry> for LogLine {
    fn from(entry: LogEntry) -> Self {
        entry.to_line()
    }
}
