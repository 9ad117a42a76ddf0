//! Undo/Redo Controller
//!
//! Deleting a line pushes an [`UndoRecord`](crate::types::UndoRecord) and
//! forks history (the redo stack is cleared). Undo re-inserts the line at
//! its old position and re-sorts; redo deletes it again by text, since its
//! position may have moved.
//!
//! ```text
//!            delete_entry                 undo
//!   log ──────────────────► undo stack ─────────► redo stack
//!                               ▲                     │
//!                               └──────── redo ───────┘
//! ```

mod controller;

pub use controller::{UndoRedoController, DEFAULT_UNDO_DEPTH};
