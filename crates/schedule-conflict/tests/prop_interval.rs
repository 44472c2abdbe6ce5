//! Property-based tests for interval mapping and conflict detection.
//!
//! These verify invariants that should hold for *any* time range and date,
//! not just the examples in `interval_tests.rs`.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use schedule_conflict::interval::{base_day_minutes, AbsoluteInterval};
use schedule_conflict::time_of_day::{
    format_for_display, parse_time_of_day, TimeRange, MINUTES_PER_DAY,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A wall-clock time within one day.
fn arb_time() -> impl Strategy<Value = (u32, u32)> {
    (0u32..24, 0u32..60)
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..=2040, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn hhmm((h, m): (u32, u32)) -> String {
    format!("{:02}:{:02}", h, m)
}

fn range(start: (u32, u32), end: (u32, u32)) -> TimeRange {
    TimeRange::new(hhmm(start), hhmm(end))
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn parse_round_trips_zero_padded_times(t in arb_time()) {
        prop_assert_eq!(parse_time_of_day(&hhmm(t)), Some(t.0 * 60 + t.1));
    }

    #[test]
    fn display_always_has_a_period(minutes in 0u32..(3 * MINUTES_PER_DAY)) {
        let s = format_for_display(minutes);
        prop_assert!(s.ends_with(" AM") || s.ends_with(" PM"));
    }

    #[test]
    fn interval_starts_on_its_own_day(date in arb_date(), s in arb_time(), e in arb_time()) {
        let iv = AbsoluteInterval::from_local_date(date, &range(s, e));
        let base = base_day_minutes(date);
        prop_assert!(iv.start_minute >= base);
        prop_assert!(iv.start_minute < base + i64::from(MINUTES_PER_DAY));
    }

    #[test]
    fn interval_never_runs_backwards(date in arb_date(), s in arb_time(), e in arb_time()) {
        let iv = AbsoluteInterval::from_local_date(date, &range(s, e));
        prop_assert!(iv.end_minute >= iv.start_minute);
        prop_assert!(iv.duration_minutes() < 2 * i64::from(MINUTES_PER_DAY));
    }

    #[test]
    fn overlap_is_symmetric(
        d1 in arb_date(), s1 in arb_time(), e1 in arb_time(),
        offset in 0u64..3, s2 in arb_time(), e2 in arb_time()
    ) {
        let d2 = d1.checked_add_days(Days::new(offset)).unwrap();
        let a = AbsoluteInterval::from_local_date(d1, &range(s1, e1));
        let b = AbsoluteInterval::from_local_date(d2, &range(s2, e2));
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        prop_assert_eq!(a.overlap_minutes(&b), b.overlap_minutes(&a));
    }

    #[test]
    fn bookings_two_days_apart_never_overlap(
        date in arb_date(), s1 in arb_time(), e1 in arb_time(), s2 in arb_time(), e2 in arb_time()
    ) {
        let later = date.checked_add_days(Days::new(2)).unwrap();
        let a = AbsoluteInterval::from_local_date(date, &range(s1, e1));
        let b = AbsoluteInterval::from_local_date(later, &range(s2, e2));
        prop_assert!(!a.overlaps(&b));
    }

    #[test]
    fn back_to_back_ranges_never_overlap(date in arb_date(), a in 1u32..1439, b in 1u32..1439) {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        prop_assume!(first < second);
        let to_time = |m: u32| (m / 60, m % 60);
        let morning = AbsoluteInterval::from_local_date(date, &range(to_time(0), to_time(first)));
        let midday = AbsoluteInterval::from_local_date(date, &range(to_time(first), to_time(second)));
        prop_assert!(!morning.overlaps(&midday));
    }

    #[test]
    fn overlap_never_exceeds_either_duration(
        date in arb_date(), s1 in arb_time(), e1 in arb_time(), s2 in arb_time(), e2 in arb_time()
    ) {
        let a = AbsoluteInterval::from_local_date(date, &range(s1, e1));
        let b = AbsoluteInterval::from_local_date(date, &range(s2, e2));
        let overlap = a.overlap_minutes(&b);
        prop_assert!(overlap >= 0);
        prop_assert!(overlap <= a.duration_minutes());
        prop_assert!(overlap <= b.duration_minutes());
    }
}
