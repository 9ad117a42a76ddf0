//! Canonical time values and sort keys

use std::fmt;

use serde::Serialize;

use crate::codec::format_timestamp;

/// A non-negative point in the video with millisecond resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct CanonicalTime(u64);

impl CanonicalTime {
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Build from clock components; `millis` is a count, not a fraction.
    ///
    /// Saturates at the largest representable time.
    pub fn from_parts(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Self {
        Self::checked_from_parts(hours, minutes, seconds, millis).unwrap_or(Self(u64::MAX))
    }

    /// Like [`from_parts`](Self::from_parts), but `None` when the total
    /// does not fit in a `u64` millisecond count.
    pub fn checked_from_parts(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Option<Self> {
        hours
            .checked_mul(60)?
            .checked_add(minutes)?
            .checked_mul(60)?
            .checked_add(seconds)?
            .checked_mul(1000)?
            .checked_add(millis)
            .map(Self)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Fractional seconds, e.g. `90.0` for `00:01:30`
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1000.0
    }

    pub fn saturating_sub_millis(&self, millis: u64) -> Self {
        Self(self.0.saturating_sub(millis))
    }
}

impl fmt::Display for CanonicalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_timestamp(*self))
    }
}

/// Ordering key of a stored line.
///
/// Variant order matters: every `At` sorts before `Unparseable`, and all
/// unparseable lines compare equal so a stable sort keeps them in place
/// relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    At(CanonicalTime),
    Unparseable,
}

impl SortKey {
    pub fn time(&self) -> Option<CanonicalTime> {
        match self {
            SortKey::At(t) => Some(*t),
            SortKey::Unparseable => None,
        }
    }
}
