//! Event Log Store
//!
//! A plain-text, line-per-entry log file that stays sorted by timestamp.
//! The store keeps no cache: every operation re-reads the file, applies its
//! change and rewrites the file atomically, so what is on disk is always
//! what the next caller sees.
//!
//! ```text
//! append ───► file (unsorted tail) ───► sort_by_timestamp ───► file (sorted)
//!                                        │
//! delete_at / insert_at / remove_first ──┘  read-all, modify, atomic write
//! ```

mod stats;
mod store;

pub use stats::LogStats;
pub use store::{suggested_export_name, EventLogStore};
