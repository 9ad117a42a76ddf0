//! Thread-safe session handle
//!
//! The store assumes a single writer. When several threads drive one log
//! (a key listener and a command shell, say), each operation must run as
//! one critical section; `SharedSession` provides that boundary.

use std::sync::Arc;

use parking_lot::Mutex;

use super::{Session, SessionConfig};
use crate::error::LogResult;
use crate::types::{Highlight, LogLine};

/// Cloneable handle to a session guarded by a mutex
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn open(config: &SessionConfig) -> LogResult<Self> {
        Ok(Self::new(Session::open(config)?))
    }

    /// Run `f` with exclusive access to the session
    pub fn with<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut session = self.inner.lock();
        f(&mut session)
    }

    pub fn record_key(&self, key: char, position_ms: u64) -> LogResult<Highlight> {
        self.with(|s| s.record_key(key, position_ms))
    }

    pub fn delete_entry(&self) -> LogResult<Highlight> {
        self.with(|s| s.delete_entry())
    }

    pub fn undo(&self) -> LogResult<Option<Highlight>> {
        self.with(|s| s.undo())
    }

    pub fn redo(&self) -> LogResult<Option<Highlight>> {
        self.with(|s| s.redo())
    }

    pub fn search(&self, term: &str) -> LogResult<Highlight> {
        self.with(|s| s.search(term))
    }

    pub fn lines(&self) -> LogResult<Vec<LogLine>> {
        self.with(|s| s.lines())
    }
}
