//! Plain availability queries for calendar display.
//!
//! Returns every booking of a resource within a UTC range, with no conflict
//! evaluation. The calendar layer renders these as busy blocks.

use tracing::debug;

use crate::booking::{Booking, DateRange, ResourceKind};
use crate::error::{ConflictError, Result};
use crate::store::{bookings_for_resource, ScheduleStore};

/// All bookings of `resource_id` scheduled within `range` (inclusive).
///
/// Results are sorted by scheduled instant, then by parsed start time.
///
/// # Errors
///
/// Returns [`ConflictError::InvalidDateRange`] if `range.start > range.end`,
/// and propagates store failures unchanged.
pub async fn resource_availability<S: ScheduleStore + ?Sized>(
    store: &S,
    kind: ResourceKind,
    company_id: &str,
    resource_id: &str,
    range: DateRange,
) -> Result<Vec<Booking>> {
    if range.start > range.end {
        return Err(ConflictError::InvalidDateRange {
            start: range.start.to_rfc3339(),
            end: range.end.to_rfc3339(),
        });
    }

    let mut bookings =
        bookings_for_resource(store, kind, company_id, resource_id, range.start, range.end)
            .await?;

    bookings.sort_by_key(|b| (b.scheduled_date, b.time_range.start_minutes()));

    debug!(
        kind = kind.as_str(),
        resource_id,
        count = bookings.len(),
        "fetched availability"
    );

    Ok(bookings)
}
