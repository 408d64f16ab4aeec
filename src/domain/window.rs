//! Session window: an inclusive time-of-day interval.

use chrono::NaiveTime;
use std::fmt;

/// A fixed time-of-day interval, inclusive on both ends.
///
/// Windows never wrap midnight: a window whose start is after its end is
/// rejected during validation, not reinterpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl SessionWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Membership test, inclusive on both ends. Date-independent.
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// True when `later` begins before this window has ended.
    pub fn overlaps(&self, later: &SessionWindow) -> bool {
        self.end > later.start
    }
}

impl fmt::Display for SessionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Parse a time-of-day in `HH:MM` or `HH:MM:SS` form.
pub fn parse_session_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}
