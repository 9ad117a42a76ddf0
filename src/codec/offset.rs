//! Session start offset and playback position conversion

use chrono::TimeDelta;

use crate::types::CanonicalTime;

/// Parse a start offset given as `HH:MM:SS`, `MM:SS` or `SS`.
///
/// Any malformed input yields a zero offset.
pub fn parse_start_offset(text: &str) -> TimeDelta {
    let parts: Result<Vec<u64>, _> = text.trim().split(':').map(|p| p.trim().parse::<u64>()).collect();

    let seconds = match parts.as_deref() {
        Ok([h, m, s]) => h * 3600 + m * 60 + s,
        Ok([m, s]) => m * 60 + s,
        Ok([s]) => *s,
        _ => return TimeDelta::zero(),
    };

    i64::try_from(seconds)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or_else(TimeDelta::zero)
}

/// Timestamp for a key press at `position_ms` into the video.
pub fn timestamp_at(position_ms: u64, offset: TimeDelta) -> CanonicalTime {
    CanonicalTime::from_millis(position_ms.saturating_add(offset_millis(offset)))
}

/// Playback position (ms) that shows the moment logged at `time`.
pub fn playback_position(time: CanonicalTime, offset: TimeDelta) -> u64 {
    time.saturating_sub_millis(offset_millis(offset)).as_millis()
}

fn offset_millis(offset: TimeDelta) -> u64 {
    u64::try_from(offset.num_milliseconds()).unwrap_or(0)
}
