//! Line-oriented command shell
//!
//! Reads one command per line, drives a [`Session`] and writes the log with
//! its highlight markers back after every change. Failures are printed and
//! the loop keeps going; only end of input or `quit` stops it.

mod commands;

use std::io::{self, BufRead, Write};

pub use commands::{Command, HELP};

use crate::codec::parse_start_offset;
use crate::error::LogError;
use crate::session::Session;
use crate::types::Highlight;

/// Shell over any reader/writer pair (stdin/stdout in the binary)
pub struct SessionShell<R, W> {
    session: Session,
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> SessionShell<R, W> {
    pub fn new(session: Session, reader: R, writer: W) -> Self {
        Self {
            session,
            reader,
            writer,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Hand back the session and writer once the shell is done
    pub fn into_parts(self) -> (Session, W) {
        (self.session, self.writer)
    }

    /// Run until end of input or `quit` (blocking)
    pub fn run(&mut self) -> io::Result<()> {
        self.render_log()?;

        let mut line = String::new();
        while self.reader.read_line(&mut line)? > 0 {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                match Command::parse(trimmed) {
                    Ok(Command::Quit) => break,
                    Ok(command) => self.handle(command)?,
                    Err(msg) => writeln!(self.writer, "{}", msg)?,
                }
                self.writer.flush()?;
            }
            line.clear();
        }

        self.writer.flush()
    }

    /// Execute one command
    pub fn handle(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Key { key, position_ms } => {
                let result = self.session.record_key(key, position_ms);
                self.report(result.map(|_| ()))
            }
            Command::Select(line) => match self.session.select_line(line) {
                Ok(Some(position_ms)) => {
                    writeln!(self.writer, "seek {} ms", position_ms)?;
                    self.render_log()
                }
                Ok(None) => {
                    writeln!(self.writer, "line {} has no timestamp", line)?;
                    self.render_log()
                }
                Err(e) => self.report_error(&e),
            },
            Command::Delete => {
                let result = self.session.delete_entry();
                self.report(result.map(|_| ()))
            }
            Command::Undo => match self.session.undo() {
                Ok(Some(_)) => self.render_log(),
                Ok(None) => writeln!(self.writer, "nothing to undo"),
                Err(e) => self.report_error(&e),
            },
            Command::Redo => match self.session.redo() {
                Ok(Some(_)) => self.render_log(),
                Ok(None) => writeln!(self.writer, "nothing to redo"),
                Err(e) => self.report_error(&e),
            },
            Command::Search(term) => match self.session.search(&term) {
                Ok(highlight) if highlight.is_none() => {
                    writeln!(self.writer, "No entries found containing: {}", term)
                }
                Ok(_) => self.render_log(),
                Err(e) => self.report_error(&e),
            },
            Command::Show => self.render_log(),
            Command::Sort => {
                let result = self.session.sort();
                self.report(result)
            }
            Command::Stats => match self.session.stats() {
                Ok(stats) => write!(self.writer, "{}", stats.report()),
                Err(e) => self.report_error(&e),
            },
            Command::Offset(text) => {
                let offset = parse_start_offset(&text);
                self.session.set_start_offset(offset);
                writeln!(self.writer, "start offset {}s", offset.num_seconds())
            }
            Command::Export(dest) => {
                let dest = dest.unwrap_or_else(|| self.session.suggested_export_name().into());
                match self.session.export_to(&dest) {
                    Ok(bytes) => writeln!(self.writer, "exported {} bytes to {}", bytes, dest.display()),
                    Err(e) => self.report_error(&e),
                }
            }
            Command::Clear { confirmed: false } => writeln!(
                self.writer,
                "This cannot be undone. Type 'clear yes' to clear the log."
            ),
            Command::Clear { confirmed: true } => {
                let result = self.session.clear();
                self.report(result)
            }
            Command::Help => writeln!(self.writer, "{}", HELP),
            Command::Quit => Ok(()),
        }
    }

    fn report(&mut self, result: Result<(), LogError>) -> io::Result<()> {
        match result {
            Ok(()) => self.render_log(),
            Err(e) => self.report_error(&e),
        }
    }

    fn report_error(&mut self, e: &LogError) -> io::Result<()> {
        writeln!(self.writer, "error: {}", e)
    }

    /// Print the log, marking highlighted lines with `*`
    pub fn render_log(&mut self) -> io::Result<()> {
        let lines = match self.session.lines() {
            Ok(lines) => lines,
            Err(LogError::StorageUnavailable { .. }) => {
                return writeln!(self.writer, "No log file found.");
            }
            Err(e) => return self.report_error(&e),
        };

        let highlight: &Highlight = self.session.highlight();
        for (idx, line) in lines.iter().enumerate() {
            let number = idx + 1;
            let marker = if highlight.contains(number) { '*' } else { ' ' };
            writeln!(self.writer, "{}{:>4}  {}", marker, number, line)?;
        }
        writeln!(self.writer, "-- {} entries", lines.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionConfig;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_script(script: &str) -> (String, Session, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let session = Session::open(&SessionConfig::new(temp_dir.path().join("log.csv"))).unwrap();
        let mut shell = SessionShell::new(session, Cursor::new(script.to_string()), Vec::new());
        shell.run().unwrap();
        let (session, out) = shell.into_parts();
        (String::from_utf8(out).unwrap(), session, temp_dir)
    }

    #[test]
    fn test_shell_records_and_highlights() {
        let (out, session, _temp_dir) = run_script("key a 5000\nkey b 2000\n");

        assert!(out.contains("*   1  00:00:02:000, b"));
        assert!(out.contains("    2  00:00:05:000, a"));
        assert_eq!(session.highlight(), &Highlight::Line(1));
    }

    #[test]
    fn test_shell_delete_undo_redo() {
        let (out, session, _temp_dir) =
            run_script("key a 1000\nkey b 2000\ndelete\nundo\nredo\nredo\n");

        assert!(out.contains("nothing to redo"));
        assert_eq!(session.lines().unwrap().len(), 1);
        assert_eq!(session.history().undo_len(), 1);
    }

    #[test]
    fn test_shell_errors_do_not_stop_loop() {
        let (out, session, _temp_dir) = run_script("bogus\nselect 9\nkey 1 10\nkey z 10\nquit\nkey y 20\n");

        assert!(out.contains("unknown command: bogus"));
        assert!(out.contains("error: index 8 out of range"));
        assert!(out.contains("error: key '1' is not alphabetic"));
        // input after quit is never read
        assert_eq!(session.lines().unwrap().len(), 1);
    }

    #[test]
    fn test_shell_clear_needs_confirmation() {
        let (out, session, _temp_dir) = run_script("key a 1000\nclear\n");
        assert!(out.contains("Type 'clear yes'"));
        assert_eq!(session.lines().unwrap().len(), 1);

        let (_, session, _temp_dir) = run_script("key a 1000\nclear yes\n");
        assert!(session.lines().unwrap().is_empty());
    }

    #[test]
    fn test_shell_search_reports_no_match() {
        let (out, _session, _temp_dir) = run_script("key a 1000\nsearch q\n");
        assert!(out.contains("No entries found containing: q"));
    }
}
