//! Utility functions and helpers
//!
//! This module contains the atomic file rewrite used by the store.

pub mod atomic;

pub use atomic::{atomic_write_lines, cleanup_stale_temp};
