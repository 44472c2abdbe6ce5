//! Wall-clock time-of-day primitives.
//!
//! Times are `"H:MM"` / `"HH:MM"` strings with minute granularity. Parsing is
//! deliberately permissive: hours and minutes are not range-checked, so
//! `"25:90"` parses to 1590 minutes. Malformed input parses to `None` and the
//! callers substitute the start-of-day / end-of-day defaults.

use serde::{Deserialize, Serialize};

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// An optional start and end wall-clock time on a single calendar date.
///
/// A missing `start` means 00:00 and a missing `end` means end of day. When
/// both are present and `end < start`, the range continues past midnight into
/// the following calendar day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl TimeRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    /// A range covering the whole day.
    pub fn all_day() -> Self {
        Self::default()
    }

    /// Parsed start in minutes since midnight, defaulting to 0.
    pub fn start_minutes(&self) -> u32 {
        self.start
            .as_deref()
            .and_then(parse_time_of_day)
            .unwrap_or(0)
    }

    /// Parsed end in minutes since midnight, defaulting to [`MINUTES_PER_DAY`].
    pub fn end_minutes(&self) -> u32 {
        self.end
            .as_deref()
            .and_then(parse_time_of_day)
            .unwrap_or(MINUTES_PER_DAY)
    }

    /// Whether this range crosses midnight. Requires both ends to parse.
    pub fn spans_midnight(&self) -> bool {
        match (self.start.as_deref(), self.end.as_deref()) {
            (Some(start), Some(end)) => spans_midnight(start, end),
            _ => false,
        }
    }
}

/// Parse `"H:MM"` or `"HH:MM"` into minutes since midnight.
///
/// Returns `None` for empty input, fewer than two colon-separated parts, or
/// non-numeric components. Components after the minutes are ignored.
///
/// Values of 24:00 and beyond are kept as-is. A range ending there runs into
/// the following day and is checked against that day's bookings. Nothing
/// past the following day is fetched.
///
/// ```
/// use schedule_conflict::time_of_day::parse_time_of_day;
///
/// assert_eq!(parse_time_of_day("9:05"), Some(545));
/// assert_eq!(parse_time_of_day("25:90"), Some(1590));
/// assert_eq!(parse_time_of_day("nine"), None);
/// ```
pub fn parse_time_of_day(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let mut parts = s.split(':');
    let hours = parse_component(parts.next()?)?;
    let minutes = parse_component(parts.next()?)?;

    hours.checked_mul(60)?.checked_add(minutes)
}

fn parse_component(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// True iff both times parse and `end` is earlier than `start`.
pub fn spans_midnight(start: &str, end: &str) -> bool {
    match (parse_time_of_day(start), parse_time_of_day(end)) {
        (Some(s), Some(e)) => e < s,
        _ => false,
    }
}

/// Format minutes since midnight as a 12-hour clock string (`"h:mm AM"`).
///
/// Values past one day wrap around, so 1440 formats as midnight.
pub fn format_for_display(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    let hours = minutes / 60;
    let mins = minutes % 60;

    let period = if hours < 12 { "AM" } else { "PM" };
    let display_hour = match hours % 12 {
        0 => 12,
        h => h,
    };

    format!("{display_hour}:{mins:02} {period}")
}

/// Format a `"HH:MM"` string for display, returning the input unchanged when
/// it cannot be parsed.
pub fn format_time_for_display(time: &str) -> String {
    match parse_time_of_day(time) {
        Some(minutes) => format_for_display(minutes),
        None => time.to_string(),
    }
}
