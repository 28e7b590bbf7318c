//! crates/schedule_core/src/time.rs
//!
//! Wall-clock time utilities: parsing `HH:MM[:SS]` strings into comparable
//! minute-of-day values and deciding whether two same-day `[start, end)`
//! intervals overlap. This is the single piece of numeric semantics the whole
//! conflict engine depends on.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A wall-clock time of day, stored as minutes since midnight.
///
/// Serializes as an `HH:MM` string, which is also the display form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Builds a time from an hour and minute pair.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::BadTime(format!("{hour:02}:{minute:02}")));
        }
        Ok(TimeOfDay(u16::from(hour) * 60 + u16::from(minute)))
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    /// Parses `HH:MM` or `HH:MM:SS`; seconds, if present, are ignored.
    ///
    /// Non-numeric or out-of-range fields are rejected rather than silently
    /// propagated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ValidationError::BadTime(s.to_string());
        let mut fields = s.split(':');
        let hour = fields.next().ok_or_else(bad)?;
        let minute = fields.next().ok_or_else(bad)?;
        let hour: u8 = hour.trim().parse().map_err(|_| bad())?;
        let minute: u8 = minute.trim().parse().map_err(|_| bad())?;
        TimeOfDay::new(hour, minute).map_err(|_| bad())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Whether two half-open `[start, end)` intervals on the same day overlap.
///
/// Touching intervals (`end1 == start2`) do not overlap.
pub fn overlaps(start1: TimeOfDay, end1: TimeOfDay, start2: TimeOfDay, end2: TimeOfDay) -> bool {
    start1 < end2 && start2 < end1
}

/// The intersection window of two intervals: the later start and the earlier
/// end. `None` when the intervals do not overlap.
pub fn intersection(
    start1: TimeOfDay,
    end1: TimeOfDay,
    start2: TimeOfDay,
    end2: TimeOfDay,
) -> Option<(TimeOfDay, TimeOfDay)> {
    if overlaps(start1, end1, start2, end2) {
        Some((start1.max(start2), end1.min(end2)))
    } else {
        None
    }
}
