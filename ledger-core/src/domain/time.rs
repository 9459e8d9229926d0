//! Simulated timestamp

use std::fmt;

use serde::{Deserialize, Serialize};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 1440 * MINUTE;
const MONTH: i64 = 43200 * MINUTE;
const YEAR: i64 = 518400 * MINUTE;

/// A point on the simulated clock
///
/// The calendar is a flat 360-day year of 30-day months. Only ordering and
/// display matter; nothing is derived from wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn new(units: i64) -> Self {
        Self(units)
    }

    pub fn units(&self) -> i64 {
        self.0
    }

    /// Move forward by `step` units
    pub fn advance(self, step: i64) -> Self {
        Self(self.0 + step)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        let year = rest / YEAR;
        rest %= YEAR;
        let month = rest / MONTH;
        rest %= MONTH;
        let day = rest / DAY;
        rest %= DAY;
        let hour = rest / HOUR;
        rest %= HOUR;
        let minute = rest / MINUTE;

        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}",
            year,
            month + 1,
            day + 1,
            hour,
            minute
        )
    }
}
