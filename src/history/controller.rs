//! Undo/redo state machine over a bounded undo stack and a redo stack

use crate::error::{LogError, LogResult};
use crate::presentation;
use crate::store::EventLogStore;
use crate::types::{Highlight, LogLine, UndoRecord};

/// Undo records kept per session unless configured otherwise
pub const DEFAULT_UNDO_DEPTH: usize = 100;

/// Owns the session's undo and redo history.
///
/// Records hold the removed line verbatim plus the index it had in sorted
/// order. Undo moves a record to the redo stack and redo moves it back, so
/// one record can be replayed back and forth any number of times.
#[derive(Debug, Clone)]
pub struct UndoRedoController {
    undo_stack: Vec<UndoRecord>,
    redo_stack: Vec<UndoRecord>,
    max_depth: usize,
}

impl UndoRedoController {
    /// Create a controller keeping at most `max_depth` undo records.
    ///
    /// A depth of zero disables undo.
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Most recent undo record, if any
    pub fn peek_undo(&self) -> Option<&UndoRecord> {
        self.undo_stack.last()
    }

    /// Drop all history (new session)
    pub fn reset(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn push_undo(&mut self, record: UndoRecord) {
        if self.max_depth == 0 {
            return;
        }
        self.undo_stack.push(record);
        while self.undo_stack.len() > self.max_depth {
            let dropped = self.undo_stack.remove(0);
            tracing::debug!(line = %dropped.line, "Undo history full, dropped oldest record");
        }
    }

    /// Delete the highlighted line (1-based), or the last line when nothing
    /// is highlighted.
    ///
    /// Returns the line to highlight next: the one before the removed
    /// position, else the new first line, else none. An empty log with no
    /// highlight is a no-op.
    pub fn delete_entry(
        &mut self,
        store: &EventLogStore,
        highlighted: Option<usize>,
    ) -> LogResult<Highlight> {
        let len = store.len()?;

        let index = match highlighted {
            Some(line) => match line.checked_sub(1) {
                Some(index) if index < len => index,
                _ => {
                    return Err(LogError::IndexOutOfRange {
                        index: line.saturating_sub(1),
                        len,
                    })
                }
            },
            None if len == 0 => return Ok(Highlight::None),
            None => len - 1,
        };

        let removed = store.delete_at(index)?;
        self.push_undo(UndoRecord::new(removed, index));
        self.redo_stack.clear();

        if let Err(e) = store.sort_by_timestamp() {
            tracing::warn!(error = %e, "Re-sort after delete failed");
        }

        tracing::debug!(
            index,
            undo_depth = self.undo_stack.len(),
            "Deleted entry"
        );

        Ok(presentation::neighbour_after_removal(len - 1, index))
    }

    /// Restore the most recently deleted line.
    ///
    /// Returns `Ok(None)` when there is nothing to undo. Otherwise the
    /// highlight points at the restored line wherever the re-sort put it.
    pub fn undo(&mut self, store: &EventLogStore) -> LogResult<Option<Highlight>> {
        let Some(record) = self.undo_stack.pop() else {
            return Ok(None);
        };

        let inserted_at = match store.insert_at(record.original_index, record.line.clone()) {
            Ok(at) => at,
            Err(e) => {
                self.undo_stack.push(record);
                return Err(e);
            }
        };

        let resorted = store.sort_by_timestamp().and_then(|_| store.lines());
        Ok(Some(self.finish_undo(record, inserted_at, resorted)))
    }

    /// Move a record whose line is back in the log onto the redo stack.
    ///
    /// The line is in the file from here on, so a failed re-sort only costs
    /// the highlight: it falls back to the insertion position.
    fn finish_undo(
        &mut self,
        record: UndoRecord,
        inserted_at: usize,
        resorted: LogResult<Vec<LogLine>>,
    ) -> Highlight {
        let highlight = match resorted {
            Ok(lines) => Highlight::from(presentation::locate(&lines, &record.line)),
            Err(e) => {
                tracing::warn!(error = %e, "Re-sort after undo failed");
                Highlight::Line(inserted_at + 1)
            }
        };

        tracing::debug!(
            line = %record.line,
            original_index = record.original_index,
            "Undo"
        );
        self.redo_stack.push(record);
        highlight
    }

    /// Delete again the line restored by the last undo.
    ///
    /// The line is found by text, not by index. If it is no longer in the
    /// log the record is discarded and nothing is highlighted.
    pub fn redo(&mut self, store: &EventLogStore) -> LogResult<Option<Highlight>> {
        let Some(record) = self.redo_stack.pop() else {
            return Ok(None);
        };

        let removed = store
            .len()
            .and_then(|len| Ok((len, store.remove_first_match(&record.line)?)));

        let remaining = match removed {
            Ok((len, Some(_))) => len - 1,
            Ok((_, None)) => {
                tracing::warn!(line = %record.line, "Redo target no longer in log, discarding");
                return Ok(Some(Highlight::None));
            }
            Err(e) => {
                self.redo_stack.push(record);
                return Err(e);
            }
        };

        if let Err(e) = store.sort_by_timestamp() {
            tracing::warn!(error = %e, "Re-sort after redo failed");
        }

        let highlight = presentation::neighbour_after_removal(remaining, record.original_index);
        tracing::debug!(line = %record.line, "Redo");
        self.push_undo(record);

        Ok(Some(highlight))
    }
}

impl Default for UndoRedoController {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn store_with(lines: &[&str]) -> (EventLogStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = EventLogStore::open(temp_dir.path().join("log.csv")).unwrap();
        let mut content = lines.join("\n");
        content.push('\n');
        fs::write(store.path(), content).unwrap();
        (store, temp_dir)
    }

    fn texts(store: &EventLogStore) -> Vec<String> {
        store
            .lines()
            .unwrap()
            .into_iter()
            .map(|l| l.as_str().to_string())
            .collect()
    }

    const THREE: [&str; 3] = ["00:00:01:000, a", "00:00:02:000, b", "00:00:03:000, c"];

    #[test]
    fn test_delete_first_then_undo_restores() {
        let (store, _temp_dir) = store_with(&THREE);
        let mut history = UndoRedoController::default();

        let highlight = history.delete_entry(&store, Some(1)).unwrap();
        assert_eq!(highlight, Highlight::Line(1));
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.peek_undo().unwrap().original_index, 0);

        let highlight = history.undo(&store).unwrap();
        assert_eq!(highlight, Some(Highlight::Line(1)));
        assert_eq!(texts(&store), THREE);
        assert_eq!(history.redo_len(), 1);
    }

    #[test]
    fn test_delete_without_highlight_removes_last() {
        let (store, _temp_dir) = store_with(&THREE);
        let mut history = UndoRedoController::default();

        let highlight = history.delete_entry(&store, None).unwrap();

        assert_eq!(texts(&store), &THREE[..2]);
        assert_eq!(highlight, Highlight::Line(2));
        assert_eq!(history.peek_undo().unwrap().original_index, 2);
    }

    #[test]
    fn test_delete_middle_highlights_previous() {
        let (store, _temp_dir) = store_with(&THREE);
        let mut history = UndoRedoController::default();

        let highlight = history.delete_entry(&store, Some(2)).unwrap();
        assert_eq!(highlight, Highlight::Line(1));
    }

    #[test]
    fn test_delete_on_empty_log_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let store = EventLogStore::open(temp_dir.path().join("log.csv")).unwrap();
        let mut history = UndoRedoController::default();

        assert_eq!(history.delete_entry(&store, None).unwrap(), Highlight::None);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_delete_last_remaining_highlights_nothing() {
        let (store, _temp_dir) = store_with(&["00:00:01:000, a"]);
        let mut history = UndoRedoController::default();

        assert_eq!(history.delete_entry(&store, Some(1)).unwrap(), Highlight::None);
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_delete_highlight_out_of_range() {
        let (store, _temp_dir) = store_with(&THREE);
        let mut history = UndoRedoController::default();

        let err = history.delete_entry(&store, Some(4)).unwrap_err();
        assert!(matches!(err, LogError::IndexOutOfRange { index: 3, len: 3 }));
        assert!(history.delete_entry(&store, Some(0)).is_err());
        assert_eq!(texts(&store), THREE);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_empty_history_is_silent() {
        let (store, _temp_dir) = store_with(&THREE);
        let mut history = UndoRedoController::default();

        assert_eq!(history.undo(&store).unwrap(), None);
        assert_eq!(history.redo(&store).unwrap(), None);
        assert_eq!(texts(&store), THREE);
    }

    #[test]
    fn test_redo_deletes_again() {
        let (store, _temp_dir) = store_with(&THREE);
        let mut history = UndoRedoController::default();

        history.delete_entry(&store, Some(3)).unwrap();
        history.undo(&store).unwrap();
        let highlight = history.redo(&store).unwrap();

        assert_eq!(texts(&store), &THREE[..2]);
        assert_eq!(highlight, Some(Highlight::Line(2)));
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_redo_of_first_line_highlights_line_one() {
        let (store, _temp_dir) = store_with(&THREE);
        let mut history = UndoRedoController::default();

        history.delete_entry(&store, Some(1)).unwrap();
        history.undo(&store).unwrap();
        assert_eq!(history.redo(&store).unwrap(), Some(Highlight::Line(1)));
    }

    #[test]
    fn test_new_delete_clears_redo() {
        let (store, _temp_dir) = store_with(&THREE);
        let mut history = UndoRedoController::default();

        history.delete_entry(&store, Some(1)).unwrap();
        history.undo(&store).unwrap();
        assert!(history.can_redo());

        history.delete_entry(&store, Some(2)).unwrap();
        assert!(!history.can_redo());

        let before = texts(&store);
        assert_eq!(history.redo(&store).unwrap(), None);
        assert_eq!(texts(&store), before);
    }

    #[test]
    fn test_undo_relocates_after_sort() {
        let (store, _temp_dir) = store_with(&THREE);
        let mut history = UndoRedoController::default();

        history.delete_entry(&store, Some(1)).unwrap();
        // A later key press lands before the deleted line's old position
        fs::write(
            store.path(),
            "00:00:00:500, z\n00:00:02:000, b\n00:00:03:000, c\n",
        )
        .unwrap();

        let highlight = history.undo(&store).unwrap();
        assert_eq!(highlight, Some(Highlight::Line(2)));
        assert_eq!(
            texts(&store),
            vec![
                "00:00:00:500, z",
                "00:00:01:000, a",
                "00:00:02:000, b",
                "00:00:03:000, c"
            ]
        );
    }

    #[test]
    fn test_duplicate_lines_resolve_to_first_match() {
        let (store, _temp_dir) = store_with(&["00:00:01:000, a", "00:00:01:000, a", "00:00:02:000, b"]);
        let mut history = UndoRedoController::default();

        history.delete_entry(&store, Some(2)).unwrap();
        assert_eq!(history.undo(&store).unwrap(), Some(Highlight::Line(1)));
    }

    #[test]
    fn test_redo_target_gone_is_discarded() {
        let (store, _temp_dir) = store_with(&THREE);
        let mut history = UndoRedoController::default();

        history.delete_entry(&store, Some(1)).unwrap();
        history.undo(&store).unwrap();
        store.clear().unwrap();

        assert_eq!(history.redo(&store).unwrap(), Some(Highlight::None));
        assert!(!history.can_redo());
        assert!(!history.can_undo());
    }

    #[test]
    fn test_depth_bound_drops_oldest() {
        let (store, _temp_dir) = store_with(&THREE);
        let mut history = UndoRedoController::new(2);

        for _ in 0..3 {
            history.delete_entry(&store, None).unwrap();
        }
        assert_eq!(history.undo_len(), 2);

        history.undo(&store).unwrap();
        history.undo(&store).unwrap();
        assert_eq!(history.undo(&store).unwrap(), None);
        // the record for "c" fell off the bottom of the stack
        assert_eq!(texts(&store), &THREE[..2]);
    }

    #[test]
    fn test_zero_depth_disables_undo() {
        let (store, _temp_dir) = store_with(&THREE);
        let mut history = UndoRedoController::new(0);

        history.delete_entry(&store, None).unwrap();
        assert!(!history.can_undo());
    }

    #[test]
    fn test_undo_failure_keeps_record() {
        let (store, _temp_dir) = store_with(&THREE);
        let mut history = UndoRedoController::default();

        history.delete_entry(&store, None).unwrap();
        fs::remove_file(store.path()).unwrap();

        assert!(matches!(
            history.undo(&store),
            Err(LogError::StorageUnavailable { .. })
        ));
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_undo_resort_failure_still_moves_record_to_redo() {
        let (store, _temp_dir) = store_with(&THREE);
        let mut history = UndoRedoController::default();
        history.delete_entry(&store, Some(2)).unwrap();

        // The insert has landed but the re-sort could not be written
        let record = history.undo_stack.pop().unwrap();
        let at = store.insert_at(record.original_index, record.line.clone()).unwrap();
        let failed = Err(LogError::StorageUnavailable {
            path: store.path().to_path_buf(),
        });

        assert_eq!(history.finish_undo(record, at, failed), Highlight::Line(2));
        assert_eq!(history.undo_len(), 0);
        assert_eq!(history.redo_len(), 1);

        // A second undo has nothing left to insert
        assert_eq!(history.undo(&store).unwrap(), None);
        assert_eq!(texts(&store), THREE);
    }
}
