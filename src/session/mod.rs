//! Logging session
//!
//! A [`Session`] owns one log store, the undo/redo history and the
//! current highlight for the lifetime of one video/log pair. It is the
//! single entry point the shell drives; every operation returns an explicit
//! result and leaves the session usable after a failure.

mod config;
mod shared;

use std::path::{Path, PathBuf};

use chrono::TimeDelta;

pub use config::{SessionConfig, ENV_LOG_PATH, ENV_START, ENV_UNDO_DEPTH};
pub use shared::SharedSession;

use crate::codec::{playback_position, timestamp_at};
use crate::error::{LogError, LogResult};
use crate::history::UndoRedoController;
use crate::presentation;
use crate::store::{suggested_export_name, EventLogStore, LogStats};
use crate::types::{Highlight, LogEntry, LogLine};

/// Log the failure of a session operation and pass the result through
fn logged<T>(operation: &'static str, result: LogResult<T>) -> LogResult<T> {
    if let Err(e) = &result {
        tracing::warn!(operation, error = %e, "Session operation failed, log unchanged");
    }
    result
}

/// One annotation session over a log file
#[derive(Debug)]
pub struct Session {
    store: EventLogStore,
    history: UndoRedoController,
    start_offset: TimeDelta,
    video_path: Option<PathBuf>,
    highlight: Highlight,
}

impl Session {
    /// Open (or create) the configured log with empty undo/redo history
    pub fn open(config: &SessionConfig) -> LogResult<Self> {
        let store = EventLogStore::open(&config.log_path)?;

        tracing::info!(
            log = %config.log_path.display(),
            undo_depth = config.undo_depth,
            start_offset_secs = config.start_offset.num_seconds(),
            "Session started"
        );

        Ok(Self {
            store,
            history: UndoRedoController::new(config.undo_depth),
            start_offset: config.start_offset,
            video_path: config.video_path.clone(),
            highlight: Highlight::None,
        })
    }

    pub fn store(&self) -> &EventLogStore {
        &self.store
    }

    pub fn history(&self) -> &UndoRedoController {
        &self.history
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = Highlight::None;
    }

    pub fn start_offset(&self) -> TimeDelta {
        self.start_offset
    }

    pub fn set_start_offset(&mut self, offset: TimeDelta) {
        self.start_offset = offset;
    }

    pub fn lines(&self) -> LogResult<Vec<LogLine>> {
        logged("read", self.store.lines())
    }

    /// Record `key` pressed at `position_ms` into the video.
    ///
    /// The entry is stamped with position plus start offset, appended,
    /// the log re-sorted, and the new line highlighted.
    pub fn record_key(&mut self, key: char, position_ms: u64) -> LogResult<Highlight> {
        if !key.is_alphabetic() {
            return Err(LogError::InvalidKey(key));
        }

        let entry = LogEntry::new(key, timestamp_at(position_ms, self.start_offset));
        let result = self
            .store
            .append(entry)
            .and_then(|_| self.store.sort_by_timestamp())
            .and_then(|_| self.store.lines());
        let lines = logged("record", result)?;

        self.highlight = presentation::locate(&lines, &entry.to_line()).into();
        tracing::debug!(entry = %entry, highlight = ?self.highlight, "Recorded key");
        Ok(self.highlight.clone())
    }

    /// Highlight line `line_number` and return the playback position (ms)
    /// showing that moment, if the line has a timestamp.
    pub fn select_line(&mut self, line_number: usize) -> LogResult<Option<u64>> {
        let lines = self.lines()?;
        let line = line_number
            .checked_sub(1)
            .and_then(|index| lines.get(index))
            .ok_or(LogError::IndexOutOfRange {
                index: line_number.saturating_sub(1),
                len: lines.len(),
            })?;

        self.highlight = Highlight::Line(line_number);
        Ok(line
            .sort_key()
            .time()
            .map(|time| playback_position(time, self.start_offset)))
    }

    /// Delete the first highlighted line, or the last line if none is
    /// highlighted.
    pub fn delete_entry(&mut self) -> LogResult<Highlight> {
        let target = self.highlight.first();
        let highlight = logged("delete", self.history.delete_entry(&self.store, target))?;
        self.highlight = highlight.clone();
        Ok(highlight)
    }

    /// Undo the last delete. `Ok(None)` when there is nothing to undo.
    pub fn undo(&mut self) -> LogResult<Option<Highlight>> {
        let result = logged("undo", self.history.undo(&self.store))?;
        if let Some(highlight) = &result {
            self.highlight = highlight.clone();
        }
        Ok(result)
    }

    /// Redo the last undone delete. `Ok(None)` when there is nothing to redo.
    pub fn redo(&mut self) -> LogResult<Option<Highlight>> {
        let result = logged("redo", self.history.redo(&self.store))?;
        if let Some(highlight) = &result {
            self.highlight = highlight.clone();
        }
        Ok(result)
    }

    /// Highlight every line containing `term`, ignoring case
    pub fn search(&mut self, term: &str) -> LogResult<Highlight> {
        let lines = logged("search", self.store.search(term))?;
        if lines.is_empty() {
            tracing::info!(term, "No entries found");
        }
        self.highlight = Highlight::Lines(lines);
        Ok(self.highlight.clone())
    }

    pub fn sort(&mut self) -> LogResult<()> {
        logged("sort", self.store.sort_by_timestamp())
    }

    /// Empty the log. Callers must have obtained confirmation first.
    pub fn clear(&mut self) -> LogResult<()> {
        logged("clear", self.store.clear())?;
        self.highlight = Highlight::None;
        Ok(())
    }

    pub fn export_to<P: AsRef<Path>>(&self, dest: P) -> LogResult<u64> {
        logged("export", self.store.export_to(dest))
    }

    /// Default export file name derived from the video
    pub fn suggested_export_name(&self) -> String {
        suggested_export_name(self.video_path.as_deref())
    }

    pub fn stats(&self) -> LogResult<LogStats> {
        logged("stats", self.store.stats())
    }
}
