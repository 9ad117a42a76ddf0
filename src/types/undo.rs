//! Undo history records

use super::LogLine;

/// A removed line and the 0-based position it held in sorted order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoRecord {
    pub line: LogLine,
    pub original_index: usize,
}

impl UndoRecord {
    pub fn new(line: LogLine, original_index: usize) -> Self {
        Self {
            line,
            original_index,
        }
    }
}
