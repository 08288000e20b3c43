mod common;

use chrono::{Datelike, Duration, Weekday};
use common::monday_anchor;

use api::services::recurrence::{build_descriptor, expand, parse_days};

#[test]
fn expand_produces_exact_count_in_order_with_anchor_duration() {
    let start = monday_anchor(18) + Duration::days(1); // Tuesday
    let end = start + Duration::minutes(45);

    let slots = expand(&[Weekday::Tue, Weekday::Fri], 7, start, end);

    assert_eq!(slots.len(), 7);
    for window in slots.windows(2) {
        assert!(window[0].0 <= window[1].0, "occurrences must be ordered");
    }
    for (s, e) in &slots {
        assert_eq!(*e - *s, Duration::minutes(45));
    }
}

#[test]
fn expand_monday_wednesday_anchored_on_monday() {
    let start = monday_anchor(18);
    let end = start + Duration::hours(1);

    let slots = expand(&[Weekday::Mon, Weekday::Wed], 4, start, end);

    let expected = [
        start,
        start + Duration::days(2),
        start + Duration::days(7),
        start + Duration::days(9),
    ];
    let starts: Vec<_> = slots.iter().map(|(s, _)| *s).collect();
    assert_eq!(starts, expected);
}

#[test]
fn expand_defaults_to_anchor_weekday_when_day_set_is_empty() {
    let start = monday_anchor(9) + Duration::days(3); // Thursday
    let end = start + Duration::hours(1);

    let slots = expand(&[], 3, start, end);

    assert_eq!(slots.len(), 3);
    for (i, (s, _)) in slots.iter().enumerate() {
        assert_eq!(s.weekday(), Weekday::Thu);
        assert_eq!(*s, start + Duration::weeks(i as i64));
    }
}

#[test]
fn expand_skips_first_week_slots_before_the_anchor() {
    let start = monday_anchor(18) + Duration::days(2); // Wednesday
    let end = start + Duration::hours(1);

    let slots = expand(&[Weekday::Mon, Weekday::Wed], 3, start, end);

    let starts: Vec<_> = slots.iter().map(|(s, _)| *s).collect();
    assert_eq!(
        starts,
        vec![
            start,                         // the anchor Wednesday itself
            start + Duration::days(5),     // next Monday
            start + Duration::days(7),     // next Wednesday
        ]
    );
}

#[test]
fn expand_keeps_the_anchor_time_of_day_on_every_slot() {
    let start = monday_anchor(6) + Duration::minutes(30);
    let end = start + Duration::hours(1);

    let slots = expand(&[Weekday::Mon, Weekday::Sat], 6, start, end);

    for (s, _) in slots {
        assert_eq!(s.time(), start.time());
    }
}

#[test]
fn build_then_parse_round_trips_the_day_set() {
    let start = monday_anchor(18);
    let days = vec![Weekday::Wed, Weekday::Mon, Weekday::Fri];

    let descriptor = build_descriptor(start, &days, 10);

    assert_eq!(descriptor, "FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=10");
    assert_eq!(
        parse_days(&descriptor),
        vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]
    );
}

#[test]
fn build_defaults_empty_day_set_to_the_start_weekday() {
    let start = monday_anchor(18) + Duration::days(5); // Saturday
    let descriptor = build_descriptor(start, &[], 2);
    assert_eq!(descriptor, "FREQ=WEEKLY;BYDAY=SA;COUNT=2");
}

#[test]
fn parse_drops_unrecognized_tokens() {
    let days = parse_days("FREQ=WEEKLY;BYDAY=MO,XX,FR,??;COUNT=4");
    assert_eq!(days, vec![Weekday::Mon, Weekday::Fri]);
}

#[test]
fn parse_of_pure_junk_degrades_to_an_empty_set() {
    assert!(parse_days("FREQ=WEEKLY;BYDAY=QQ,ZZ;COUNT=4").is_empty());
    assert!(parse_days("complete nonsense").is_empty());
    assert!(parse_days("").is_empty());
}

#[test]
fn parse_accepts_mixed_case_and_spelled_out_names() {
    let days = parse_days("mo,Friday,WED");
    assert_eq!(days, vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]);
}

#[test]
fn parse_collapses_duplicate_days() {
    let days = parse_days("BYDAY=MO,MO,Monday");
    assert_eq!(days, vec![Weekday::Mon]);
}
