//! Tallies over the current log

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{CanonicalTime, LogLine};

/// Summary of a log: how many of each key, and the time span covered
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogStats {
    /// Non-blank lines in the file
    pub total_lines: usize,
    /// Lines that carry no recoverable entry
    pub malformed_lines: usize,
    /// Entry count per key, e.g. cars per lane
    pub per_key: BTreeMap<char, usize>,
    pub first: Option<CanonicalTime>,
    pub last: Option<CanonicalTime>,
}

impl LogStats {
    pub fn from_lines(lines: &[LogLine]) -> Self {
        let mut stats = LogStats {
            total_lines: lines.len(),
            ..Default::default()
        };

        for line in lines {
            match line.entry() {
                Some(entry) => {
                    *stats.per_key.entry(entry.key).or_default() += 1;
                    stats.first = Some(stats.first.map_or(entry.timestamp, |t| t.min(entry.timestamp)));
                    stats.last = Some(stats.last.map_or(entry.timestamp, |t| t.max(entry.timestamp)));
                }
                None => stats.malformed_lines += 1,
            }
        }

        stats
    }

    pub fn entry_count(&self) -> usize {
        self.total_lines - self.malformed_lines
    }

    /// Time between the first and the last entry
    pub fn span(&self) -> Option<CanonicalTime> {
        match (self.first, self.last) {
            (Some(first), Some(last)) => {
                Some(CanonicalTime::from_millis(last.as_millis() - first.as_millis()))
            }
            _ => None,
        }
    }

    /// Human-readable multi-line report
    pub fn report(&self) -> String {
        let mut out = format!(
            "{} entries ({} malformed lines)\n",
            self.entry_count(),
            self.malformed_lines
        );
        if let (Some(first), Some(last)) = (self.first, self.last) {
            out.push_str(&format!("first {}  last {}\n", first, last));
        }
        for (key, count) in &self.per_key {
            out.push_str(&format!("  {}: {}\n", key, count));
        }
        out
    }
}
