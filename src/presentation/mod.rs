//! Log Presentation Adapter
//!
//! Pure mappings from positions or logical entries to the 1-based line
//! numbers a display marks. Positions are not stable across a sort, so
//! callers re-locate an entry by its text after every re-sort.

use crate::types::{Highlight, LogLine};

/// Line number of 0-based `index` in a log of `len` lines
pub fn line_for_index(len: usize, index: usize) -> Option<usize> {
    (index < len).then_some(index + 1)
}

/// Line numbers for a set of indices, dropping any outside the log
pub fn lines_for_indices(len: usize, indices: &[usize]) -> Vec<usize> {
    indices
        .iter()
        .filter_map(|&index| line_for_index(len, index))
        .collect()
}

/// First line whose text matches `target` exactly.
///
/// Identical duplicates resolve to the earliest one.
pub fn locate(lines: &[LogLine], target: &LogLine) -> Option<usize> {
    lines
        .iter()
        .position(|line| line.matches(target))
        .map(|index| index + 1)
}

/// Highlight after removing the line at `removed_index`, given `len` lines
/// remaining: the line before it, else the new first line, else nothing.
pub fn neighbour_after_removal(len: usize, removed_index: usize) -> Highlight {
    if len == 0 {
        Highlight::None
    } else if removed_index > 0 {
        Highlight::Line(removed_index.min(len))
    } else {
        Highlight::Line(1)
    }
}
