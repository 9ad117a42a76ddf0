//! Event Log Store - file-backed ordered log
//!
//! The EventLogStore owns one log file and performs every operation as a
//! complete read-modify-write cycle against it.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::{LogError, LogResult};
use crate::types::{LogEntry, LogLine};
use crate::utils::atomic::{atomic_write_lines, cleanup_stale_temp};

use super::LogStats;

/// The EventLogStore manages one plain-text log file
#[derive(Debug, Clone)]
pub struct EventLogStore {
    path: PathBuf,
}

impl EventLogStore {
    /// Open the log at `path`, creating an empty file if none exists.
    ///
    /// A temp file left by an interrupted rewrite is removed.
    pub fn open<P: AsRef<Path>>(path: P) -> LogResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        match cleanup_stale_temp(&path) {
            Ok(true) => tracing::warn!(path = %path.display(), "Removed stale temp file from interrupted write"),
            Ok(false) => {}
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "Could not remove stale temp file"),
        }

        OpenOptions::new().create(true).append(true).open(&path)?;
        tracing::debug!(path = %path.display(), "Opened event log");

        Ok(Self { path })
    }

    /// Get the log file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_error(&self, e: io::Error) -> LogError {
        if e.kind() == io::ErrorKind::NotFound {
            LogError::StorageUnavailable {
                path: self.path.clone(),
            }
        } else {
            LogError::Io(e)
        }
    }

    /// Load all non-blank lines in file order
    pub fn lines(&self) -> LogResult<Vec<LogLine>> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.read_error(e))?;
        Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(LogLine::new)
            .collect())
    }

    pub fn len(&self) -> LogResult<usize> {
        Ok(self.lines()?.len())
    }

    pub fn is_empty(&self) -> LogResult<bool> {
        Ok(self.len()? == 0)
    }

    fn write_lines(&self, lines: &[LogLine]) -> LogResult<()> {
        atomic_write_lines(&self.path, lines.iter().map(LogLine::as_str))?;
        Ok(())
    }

    /// Append an entry in canonical form at the end of the file.
    ///
    /// The file is not re-sorted; call [`sort_by_timestamp`](Self::sort_by_timestamp).
    pub fn append(&self, entry: LogEntry) -> LogResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        // A hand-edited file may lack its final newline
        if file.metadata()?.len() > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                file.write_all(b"\n")?;
            }
        }

        writeln!(file, "{}", entry)?;
        file.sync_all()?;

        tracing::debug!(entry = %entry, "Appended entry");
        Ok(())
    }

    /// Stable sort of every line by timestamp; unparseable lines sink to the
    /// end in their existing order. Blank lines are dropped.
    pub fn sort_by_timestamp(&self) -> LogResult<()> {
        let mut lines = self.lines()?;
        lines.sort_by_cached_key(LogLine::sort_key);
        self.write_lines(&lines)
    }

    /// Remove and return the line at 0-based `index`.
    pub fn delete_at(&self, index: usize) -> LogResult<LogLine> {
        let mut lines = self.lines()?;
        if index >= lines.len() {
            return Err(LogError::IndexOutOfRange {
                index,
                len: lines.len(),
            });
        }

        let removed = lines.remove(index);
        self.write_lines(&lines)?;

        tracing::debug!(index, line = %removed, "Deleted line");
        Ok(removed)
    }

    /// Insert `line` at `index` clamped to `[0, len]`; returns the index used.
    ///
    /// Does not re-sort.
    pub fn insert_at(&self, index: usize, line: LogLine) -> LogResult<usize> {
        let mut lines = self.lines()?;
        let at = index.min(lines.len());

        tracing::debug!(requested = index, at, line = %line, "Inserting line");
        lines.insert(at, line);
        self.write_lines(&lines)?;

        Ok(at)
    }

    /// Remove the first line whose text matches `line` exactly.
    ///
    /// Returns the 0-based index removed, or `None` (and no write) when no
    /// line matches.
    pub fn remove_first_match(&self, line: &LogLine) -> LogResult<Option<usize>> {
        let mut lines = self.lines()?;
        let Some(index) = lines.iter().position(|l| l.matches(line)) else {
            return Ok(None);
        };

        lines.remove(index);
        self.write_lines(&lines)?;

        tracing::debug!(index, line = %line, "Removed matching line");
        Ok(Some(index))
    }

    /// 1-based line numbers of all lines accepted by `predicate`
    pub fn find_line_numbers<F>(&self, predicate: F) -> LogResult<Vec<usize>>
    where
        F: Fn(&LogLine) -> bool,
    {
        Ok(self
            .lines()?
            .iter()
            .enumerate()
            .filter(|(_, line)| predicate(line))
            .map(|(idx, _)| idx + 1)
            .collect())
    }

    /// Case-insensitive substring search
    pub fn search(&self, term: &str) -> LogResult<Vec<usize>> {
        let needle = term.to_lowercase();
        self.find_line_numbers(|line| line.as_str().to_lowercase().contains(&needle))
    }

    /// Truncate the log to empty
    pub fn clear(&self) -> LogResult<()> {
        self.write_lines(&[])?;
        tracing::info!(path = %self.path.display(), "Cleared event log");
        Ok(())
    }

    /// Copy the log byte-for-byte to `dest`; returns bytes copied.
    pub fn export_to<P: AsRef<Path>>(&self, dest: P) -> LogResult<u64> {
        let dest = dest.as_ref();
        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut src = File::open(&self.path).map_err(|e| self.read_error(e))?;
        let mut out = File::create(dest)?;
        let bytes = io::copy(&mut src, &mut out)?;
        out.sync_all()?;

        tracing::info!(dest = %dest.display(), bytes, "Exported event log");
        Ok(bytes)
    }

    pub fn stats(&self) -> LogResult<LogStats> {
        Ok(LogStats::from_lines(&self.lines()?))
    }
}

/// File name offered when exporting: `<video stem>.csv`, or `log.csv`.
pub fn suggested_export_name(video_path: Option<&Path>) -> String {
    video_path
        .and_then(|p| p.file_stem())
        .map(|stem| format!("{}.csv", stem.to_string_lossy()))
        .unwrap_or_else(|| "log.csv".to_string())
}
