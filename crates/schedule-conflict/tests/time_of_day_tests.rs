//! Tests for wall-clock parsing, midnight detection, and display formatting.

use schedule_conflict::time_of_day::{
    format_for_display, format_time_for_display, parse_time_of_day, spans_midnight, TimeRange,
    MINUTES_PER_DAY,
};

#[test]
fn parses_two_digit_hours() {
    assert_eq!(parse_time_of_day("09:30"), Some(570));
    assert_eq!(parse_time_of_day("23:59"), Some(1439));
    assert_eq!(parse_time_of_day("00:00"), Some(0));
}

#[test]
fn parses_single_digit_hours() {
    assert_eq!(parse_time_of_day("9:05"), Some(545));
    assert_eq!(parse_time_of_day("0:15"), Some(15));
}

#[test]
fn out_of_range_values_are_not_rejected() {
    assert_eq!(parse_time_of_day("25:90"), Some(25 * 60 + 90));
    assert_eq!(parse_time_of_day("24:00"), Some(1440));
}

#[test]
fn malformed_input_parses_to_none() {
    assert_eq!(parse_time_of_day(""), None);
    assert_eq!(parse_time_of_day("   "), None);
    assert_eq!(parse_time_of_day("0930"), None, "missing colon");
    assert_eq!(parse_time_of_day("ab:cd"), None);
    assert_eq!(parse_time_of_day("9:"), None);
    assert_eq!(parse_time_of_day(":30"), None);
    assert_eq!(parse_time_of_day("-1:30"), None);
    assert_eq!(parse_time_of_day("9:3x"), None);
}

#[test]
fn trailing_seconds_are_ignored() {
    assert_eq!(parse_time_of_day("14:30:00"), Some(870));
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    assert_eq!(parse_time_of_day(" 08:00 "), Some(480));
}

#[test]
fn spans_midnight_only_when_end_before_start() {
    assert!(spans_midnight("22:00", "02:00"));
    assert!(spans_midnight("23:30", "00:00"));
    assert!(!spans_midnight("09:00", "17:00"));
    assert!(!spans_midnight("12:00", "12:00"), "equal times do not cross");
}

#[test]
fn spans_midnight_requires_both_to_parse() {
    assert!(!spans_midnight("22:00", "garbage"));
    assert!(!spans_midnight("", "02:00"));
}

#[test]
fn range_defaults_cover_the_whole_day() {
    let range = TimeRange::all_day();
    assert_eq!(range.start_minutes(), 0);
    assert_eq!(range.end_minutes(), MINUTES_PER_DAY);
    assert!(!range.spans_midnight());
}

#[test]
fn range_with_malformed_end_uses_end_of_day() {
    let range = TimeRange {
        start: Some("20:00".to_string()),
        end: Some("late".to_string()),
    };
    assert_eq!(range.end_minutes(), MINUTES_PER_DAY);
    assert!(!range.spans_midnight());
}

#[test]
fn range_spanning_midnight() {
    assert!(TimeRange::new("22:00", "02:00").spans_midnight());
    assert!(!TimeRange::new("08:00", "10:00").spans_midnight());
}

#[test]
fn formats_midnight_and_noon() {
    assert_eq!(format_for_display(0), "12:00 AM");
    assert_eq!(format_for_display(12 * 60), "12:00 PM");
}

#[test]
fn formats_morning_and_evening() {
    assert_eq!(format_for_display(9 * 60 + 5), "9:05 AM");
    assert_eq!(format_for_display(13 * 60 + 30), "1:30 PM");
    assert_eq!(format_for_display(23 * 60 + 59), "11:59 PM");
}

#[test]
fn formatting_wraps_past_one_day() {
    assert_eq!(format_for_display(MINUTES_PER_DAY), "12:00 AM");
    assert_eq!(format_for_display(MINUTES_PER_DAY + 60), "1:00 AM");
}

#[test]
fn format_time_string_for_display() {
    assert_eq!(format_time_for_display("14:15"), "2:15 PM");
    assert_eq!(format_time_for_display("00:45"), "12:45 AM");
}

#[test]
fn unparsable_time_string_is_returned_unchanged() {
    assert_eq!(format_time_for_display("noonish"), "noonish");
    assert_eq!(format_time_for_display(""), "");
}

#[test]
fn time_range_deserializes_from_camel_case_json() {
    let range: TimeRange = serde_json::from_str(r#"{"start":"22:00","end":"02:00"}"#).unwrap();
    assert_eq!(range, TimeRange::new("22:00", "02:00"));

    let open: TimeRange = serde_json::from_str(r#"{"start":null}"#).unwrap();
    assert_eq!(open, TimeRange::all_day());
}
