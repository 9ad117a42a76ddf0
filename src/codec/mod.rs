//! Timestamp codec
//!
//! Converts between the textual clock form used in log files and
//! [`CanonicalTime`](crate::types::CanonicalTime):
//!
//! ```text
//! canonical line   00:01:30:250, a     (timestamp first, comma)
//! legacy line      a: 00:01:30         (key first, colon; read only)
//! start offset     01:02:03 | 02:03 | 3
//! ```

mod offset;
mod timestamp;

pub use offset::{parse_start_offset, playback_position, timestamp_at};
pub use timestamp::{format_timestamp, line_sort_key, parse_timestamp, split_line};
