//! Timezone-aware local calendar dates.
//!
//! Bookings are stored as UTC instants but mean a calendar date in the
//! company's timezone. This module owns every conversion between the two:
//! the local date of an instant, the UTC bounds of a local day, and the set
//! of local dates a candidate booking can touch.
//!
//! An identifier that is not a valid IANA timezone does not fail the
//! conversion. It resolves to a [`ZoneContext`] flagged `degraded`, which
//! treats instants as already local (UTC calendar dates). Callers that want a
//! hard failure use [`parse_timezone`] instead.

use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::warn;

use crate::error::{ConflictError, Result};
use crate::interval::{base_day_minutes, AbsoluteInterval};
use crate::time_of_day::{TimeRange, MINUTES_PER_DAY};

/// Format of local calendar date strings.
pub const LOCAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Wall-clock gaps at local midnight are at most this long.
const MAX_MIDNIGHT_GAP_MINUTES: i64 = 180;

/// A timezone resolved for conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneContext {
    /// The identifier as supplied.
    pub name: String,
    /// The zone used for conversions. `UTC` when `degraded`.
    pub tz: Tz,
    /// True when `name` could not be resolved and UTC-as-local was applied.
    pub degraded: bool,
}

impl ZoneContext {
    /// Resolve an IANA identifier, degrading to UTC-as-local when unknown.
    pub fn resolve(name: &str) -> Self {
        match name.parse::<Tz>() {
            Ok(tz) => Self {
                name: name.to_string(),
                tz,
                degraded: false,
            },
            Err(_) => {
                warn!(timezone = name, "unknown timezone, treating UTC dates as local");
                Self {
                    name: name.to_string(),
                    tz: Tz::UTC,
                    degraded: true,
                }
            }
        }
    }

    /// Resolve an IANA identifier, failing when unknown.
    pub fn strict(name: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            tz: parse_timezone(name)?,
            degraded: false,
        })
    }

    /// The local calendar date of a UTC instant.
    pub fn local_date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    /// UTC instants of 00:00:00.000 and 23:59:59.999 local time on `date`.
    pub fn day_bounds(&self, date: NaiveDate) -> DayBounds {
        let start_of_day_utc = local_midnight_utc(&self.tz, date);
        let next_midnight = date
            .checked_add_days(Days::new(1))
            .map(|next| local_midnight_utc(&self.tz, next))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        DayBounds {
            date,
            start_of_day_utc,
            end_of_day_utc: next_midnight - Duration::milliseconds(1),
            degraded: self.degraded,
        }
    }

    /// Local dates a candidate scheduled at `instant` could overlap.
    pub fn dates_for_candidate(&self, instant: DateTime<Utc>, range: &TimeRange) -> CandidateDates {
        let primary = self.local_date_of(instant);
        let previous = primary.checked_sub_days(Days::new(1)).unwrap_or(primary);
        let reaches_next_day = AbsoluteInterval::from_local_date(primary, range).end_minute
            > base_day_minutes(primary) + i64::from(MINUTES_PER_DAY);
        let secondary = if range.spans_midnight() || reaches_next_day {
            primary.checked_add_days(Days::new(1))
        } else {
            None
        };

        CandidateDates {
            primary,
            secondary,
            previous,
            degraded: self.degraded,
        }
    }
}

/// UTC bounds of one local calendar day. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBounds {
    pub date: NaiveDate,
    pub start_of_day_utc: DateTime<Utc>,
    pub end_of_day_utc: DateTime<Utc>,
    pub degraded: bool,
}

impl DayBounds {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start_of_day_utc <= instant && instant <= self.end_of_day_utc
    }
}

/// The local dates examined for a candidate booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateDates {
    /// The candidate's own local date.
    pub primary: NaiveDate,
    /// The following day, present when the candidate crosses midnight or an
    /// out-of-range end time carries it past the end of its own day.
    pub secondary: Option<NaiveDate>,
    /// The preceding day. Bookings there may run past midnight.
    pub previous: NaiveDate,
    pub degraded: bool,
}

impl CandidateDates {
    /// Dates in query order: primary, previous, then secondary if present.
    pub fn query_dates(&self) -> Vec<NaiveDate> {
        let mut dates = vec![self.primary];
        if self.previous != self.primary {
            dates.push(self.previous);
        }
        dates.extend(self.secondary);
        dates
    }
}

/// A local date computed from a UTC instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalDate {
    pub date: NaiveDate,
    pub degraded: bool,
}

impl LocalDate {
    pub fn to_date_string(&self) -> String {
        self.date.format(LOCAL_DATE_FORMAT).to_string()
    }
}

/// Local calendar date of `instant` in `timezone`.
///
/// An unknown timezone yields the UTC calendar date with `degraded` set.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use schedule_conflict::local_date::local_date_of;
///
/// // 03:00 UTC on June 2 is still June 1 in New York.
/// let instant = Utc.with_ymd_and_hms(2024, 6, 2, 3, 0, 0).unwrap();
/// let local = local_date_of(instant, "America/New_York");
/// assert_eq!(local.to_date_string(), "2024-06-01");
/// ```
pub fn local_date_of(instant: DateTime<Utc>, timezone: &str) -> LocalDate {
    let zone = ZoneContext::resolve(timezone);
    LocalDate {
        date: zone.local_date_of(instant),
        degraded: zone.degraded,
    }
}

/// UTC bounds of the local day named by `local_date` (`"YYYY-MM-DD"`).
///
/// # Errors
///
/// Returns [`ConflictError::InvalidDate`] if `local_date` is malformed.
pub fn day_bounds_utc(local_date: &str, timezone: &str) -> Result<DayBounds> {
    let date = parse_local_date(local_date)?;
    Ok(ZoneContext::resolve(timezone).day_bounds(date))
}

/// Local dates a candidate scheduled at `scheduled_date` could overlap.
pub fn dates_for_candidate(
    scheduled_date: DateTime<Utc>,
    range: &TimeRange,
    timezone: &str,
) -> CandidateDates {
    ZoneContext::resolve(timezone).dates_for_candidate(scheduled_date, range)
}

/// Parse a `"YYYY-MM-DD"` local date string.
pub fn parse_local_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), LOCAL_DATE_FORMAT)
        .map_err(|e| ConflictError::InvalidDate(format!("'{}': {}", s, e)))
}

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| ConflictError::InvalidTimezone(format!("'{}'", s)))
}

/// First instant of `date` in `tz`.
///
/// When midnight is ambiguous the earlier instant wins. When midnight falls in
/// a DST gap the day starts at the first wall-clock minute after the gap.
fn local_midnight_utc(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);

    (0..=MAX_MIDNIGHT_GAP_MINUTES)
        .find_map(|offset| {
            tz.from_local_datetime(&(midnight + Duration::minutes(offset)))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}
