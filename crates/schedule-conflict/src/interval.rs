//! Absolute minute-axis intervals.
//!
//! Every (local calendar date, [`TimeRange`]) pair is mapped onto one integer
//! axis: minutes since 1970-01-01 00:00 wall-clock time. A range that crosses
//! midnight becomes a single contiguous interval reaching into the next day's
//! minutes, so overlap between any two bookings is one half-open comparison.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::time_of_day::{TimeRange, MINUTES_PER_DAY};

const DAY: i64 = MINUTES_PER_DAY as i64;

/// `num_days_from_ce()` of 1970-01-01.
const EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// A half-open `[start_minute, end_minute)` interval on the absolute axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsoluteInterval {
    pub start_minute: i64,
    pub end_minute: i64,
}

impl AbsoluteInterval {
    /// Map a time range on a local calendar date onto the absolute axis.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use schedule_conflict::interval::AbsoluteInterval;
    /// use schedule_conflict::time_of_day::TimeRange;
    ///
    /// let date = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
    /// let iv = AbsoluteInterval::from_local_date(date, &TimeRange::new("22:00", "02:00"));
    /// assert_eq!(iv.start_minute, 1440 + 22 * 60);
    /// assert_eq!(iv.end_minute, 2 * 1440 + 2 * 60);
    /// ```
    pub fn from_local_date(date: NaiveDate, range: &TimeRange) -> Self {
        let base = base_day_minutes(date);
        let start = i64::from(range.start_minutes());
        let end = i64::from(range.end_minutes());

        let end_minute = if end < start {
            base + DAY + end
        } else {
            base + end
        };

        Self {
            start_minute: base + start,
            end_minute,
        }
    }

    /// Half-open intersection test. Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &AbsoluteInterval) -> bool {
        self.start_minute < other.end_minute && other.start_minute < self.end_minute
    }

    /// Minutes shared with `other`, or 0 when they do not overlap.
    pub fn overlap_minutes(&self, other: &AbsoluteInterval) -> i64 {
        if !self.overlaps(other) {
            return 0;
        }
        self.end_minute.min(other.end_minute) - self.start_minute.max(other.start_minute)
    }

    pub fn duration_minutes(&self) -> i64 {
        self.end_minute - self.start_minute
    }
}

/// Day number of `date` since 1970-01-01, times the minutes in a day.
pub fn base_day_minutes(date: NaiveDate) -> i64 {
    (i64::from(date.num_days_from_ce()) - EPOCH_DAYS_FROM_CE) * DAY
}
