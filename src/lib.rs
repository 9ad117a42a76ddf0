//! Video Event Log
//!
//! An ordered, undoable log of key presses stamped with video time, for
//! annotating footage by hand (counting passing cars, tagging events).
//!
//! # Features
//!
//! - **Always sorted**: entries logged out of order (after pausing and
//!   rewinding) are re-sorted by timestamp after every change
//! - **Undo/Redo**: deletes are undoable and re-doable, with redo history
//!   dropped on every new delete
//! - **Legacy tolerant**: reads old `k: HH:MM:SS` lines; malformed lines are
//!   kept and sink to the bottom instead of breaking the sort
//! - **Atomic writes**: the log file is rewritten via temp file + rename
//!
//! # Modules
//!
//! - `types`: Core data structures (LogEntry, LogLine, CanonicalTime, Highlight)
//! - `codec`: Timestamp parsing/formatting and start offsets
//! - `store`: File-backed event log store
//! - `history`: Undo/redo controller
//! - `presentation`: Line-number mapping for highlights
//! - `session`: Session state and configuration
//! - `shell`: Line-oriented command shell
//! - `utils`: Atomic file writes
//!
//! # Example
//!
//! ```no_run
//! use video_event_log::{Session, SessionConfig};
//!
//! fn main() -> video_event_log::LogResult<()> {
//!     let config = SessionConfig::for_video("junction.mp4").with_start("07:30:00");
//!     let mut session = Session::open(&config)?;
//!
//!     session.record_key('c', 12_500)?;
//!     session.delete_entry()?;
//!     session.undo()?;
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod error;
pub mod history;
pub mod presentation;
pub mod session;
pub mod shell;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use error::{LogError, LogResult, ParseError};
pub use history::UndoRedoController;
pub use session::{Session, SessionConfig, SharedSession};
pub use store::{EventLogStore, LogStats};
pub use types::{CanonicalTime, Highlight, LogEntry, LogLine, SortKey, UndoRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
