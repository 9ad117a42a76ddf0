//! `HH:MM:SS[:mmm]` parsing and formatting

use crate::error::ParseError;
use crate::types::{CanonicalTime, SortKey};

/// Parse `H:MM:SS` or `H:MM:SS:mmm`.
///
/// Components are summed without range checks and the fourth component is
/// a millisecond count. Anything after the fourth component is ignored.
/// A total too large for a millisecond `u64` is an `Overflow`.
pub fn parse_timestamp(text: &str) -> Result<CanonicalTime, ParseError> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.len() < 3 {
        return Err(ParseError::TooFewComponents(parts.len()));
    }

    let mut values = [0u64; 4];
    for (slot, part) in values.iter_mut().zip(parts.iter()) {
        let part = part.trim();
        *slot = part
            .parse::<u64>()
            .map_err(|_| ParseError::InvalidComponent(part.to_string()))?;
    }

    let [hours, minutes, seconds, millis] = values;
    CanonicalTime::checked_from_parts(hours, minutes, seconds, millis)
        .ok_or_else(|| ParseError::Overflow(text.trim().to_string()))
}

/// Render as zero-padded `HH:MM:SS:mmm`; hours widen past two digits.
pub fn format_timestamp(time: CanonicalTime) -> String {
    let total = time.as_millis();
    let hours = total / 3_600_000;
    let minutes = (total % 3_600_000) / 60_000;
    let seconds = (total % 60_000) / 1000;
    let millis = total % 1000;
    format!("{:02}:{:02}:{:02}:{:03}", hours, minutes, seconds, millis)
}

/// Split a stored line into `(timestamp, key)` text.
///
/// A comma means the canonical layout, timestamp before the first comma.
/// Otherwise a colon means the legacy layout, key before the first colon.
pub fn split_line(line: &str) -> Option<(&str, &str)> {
    if let Some((timestamp, key)) = line.split_once(',') {
        Some((timestamp.trim(), key.trim()))
    } else if let Some((key, timestamp)) = line.split_once(':') {
        Some((timestamp.trim(), key.trim()))
    } else {
        None
    }
}

/// Ordering key for a stored line; malformed lines sort last.
pub fn line_sort_key(line: &str) -> SortKey {
    let parsed = split_line(line)
        .ok_or(ParseError::MissingTimestamp)
        .and_then(|(timestamp, _)| parse_timestamp(timestamp));

    match parsed {
        Ok(time) => SortKey::At(time),
        Err(e) => {
            tracing::trace!(line, error = %e, "Unparseable log line sorts last");
            SortKey::Unparseable
        }
    }
}
