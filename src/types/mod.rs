//! Data types for the event log
//!
//! This module contains the value types shared by the codec, the store,
//! the undo/redo controller and the presentation adapter.

mod entry;
mod highlight;
mod time;
mod undo;

pub use entry::{LogEntry, LogLine};
pub use highlight::Highlight;
pub use time::{CanonicalTime, SortKey};
pub use undo::UndoRecord;
