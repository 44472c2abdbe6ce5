//! Detect existing bookings that overlap a candidate interval.
//!
//! Each existing booking is placed on its own local calendar date, mapped to
//! the absolute minute axis, and compared with the candidate there.
//! Adjacent bookings (where one ends exactly when another starts) are NOT conflicts.

use crate::booking::{Booking, BookingConflict};
use crate::interval::AbsoluteInterval;
use crate::local_date::ZoneContext;

/// Find every booking in `existing` that overlaps `candidate`.
///
/// Two intervals overlap when `a.start < b.end && b.start < a.end`.
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_conflicts(
    candidate: &AbsoluteInterval,
    existing: &[Booking],
    zone: &ZoneContext,
) -> Vec<BookingConflict> {
    existing
        .iter()
        .filter_map(|booking| {
            let local_date = zone.local_date_of(booking.scheduled_date);
            let interval = AbsoluteInterval::from_local_date(local_date, &booking.time_range);

            candidate.overlaps(&interval).then(|| BookingConflict {
                booking: booking.clone(),
                local_date,
                overlap_minutes: candidate.overlap_minutes(&interval),
            })
        })
        .collect()
}
