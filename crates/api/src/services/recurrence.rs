//! Weekly recurrence descriptors and their expansion into concrete
//! occurrence windows.
//!
//! Descriptor strings use a canonical `FREQ=WEEKLY;BYDAY=MO,WE;COUNT=4`
//! form. Parsing is deliberately tolerant: unrecognized day tokens are
//! dropped (and logged), and an empty surviving day set falls back to the
//! anchor's weekday at expansion time. Downstream callers rely on this
//! degrade-to-default behavior, so it must not be tightened into an error.

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};

/// Extract the day-of-week set from a descriptor string.
///
/// Accepts the canonical two-letter codes (`MO`..`SU`, case-insensitive) as
/// well as spelled-out day names. Tokens that resolve to no weekday are
/// dropped; duplicates collapse. The result is in Monday-first order and may
/// be empty, in which case expansion defaults to the anchor's weekday.
pub fn parse_days(descriptor: &str) -> Vec<Weekday> {
    let byday = descriptor
        .split(';')
        .find_map(|part| part.trim().strip_prefix("BYDAY="))
        .unwrap_or(descriptor);

    let mut days: Vec<Weekday> = Vec::new();
    let mut dropped = 0usize;
    for token in byday.split([',', ' ']).map(str::trim).filter(|t| !t.is_empty()) {
        match weekday_from_token(token) {
            Some(day) => {
                if !days.contains(&day) {
                    days.push(day);
                }
            }
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        tracing::warn!(
            descriptor,
            dropped,
            "dropped unrecognized weekday tokens from recurrence descriptor"
        );
    }
    days.sort_by_key(|d| d.num_days_from_monday());
    days
}

/// Canonical descriptor string for a weekly pattern.
///
/// An empty `days` set is replaced by the weekday of `start_time`, so the
/// stored descriptor always names at least one day. Round-trips through
/// [`parse_days`].
pub fn build_descriptor(start_time: DateTime<Utc>, days: &[Weekday], count: u32) -> String {
    let days = canonical_days(days, start_time);
    let byday: Vec<&str> = days.iter().map(|d| day_code(*d)).collect();
    format!("FREQ=WEEKLY;BYDAY={};COUNT={}", byday.join(","), count)
}

/// Expand a weekly pattern into `count` concrete `(start, end)` windows.
///
/// The walk starts in the anchor's week and emits one timestamp per matching
/// weekday per week, at the anchor's time of day, preserving the anchor's
/// duration. First-week slots that land before the anchor itself are
/// skipped. Output is in non-decreasing chronological order and always has
/// exactly `count` elements.
pub fn expand(
    days: &[Weekday],
    count: u32,
    anchor_start: DateTime<Utc>,
    anchor_end: DateTime<Utc>,
) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let duration = anchor_end - anchor_start;
    let days = canonical_days(days, anchor_start);

    // Monday of the anchor's week, keeping the anchor's time of day.
    let week_anchor =
        anchor_start - Duration::days(anchor_start.weekday().num_days_from_monday() as i64);

    let wanted = count as usize;
    let mut out = Vec::with_capacity(wanted);
    let mut week = 0i64;
    while out.len() < wanted {
        for day in &days {
            let start = week_anchor
                + Duration::weeks(week)
                + Duration::days(day.num_days_from_monday() as i64);
            if start < anchor_start {
                continue;
            }
            out.push((start, start + duration));
            if out.len() == wanted {
                break;
            }
        }
        week += 1;
    }
    out
}

/// Sorted, deduplicated day set; falls back to the anchor's weekday when
/// empty.
fn canonical_days(days: &[Weekday], anchor: DateTime<Utc>) -> Vec<Weekday> {
    let mut days: Vec<Weekday> = days.to_vec();
    if days.is_empty() {
        days.push(anchor.weekday());
    }
    days.sort_by_key(|d| d.num_days_from_monday());
    days.dedup();
    days
}

fn weekday_from_token(token: &str) -> Option<Weekday> {
    match token.to_ascii_uppercase().as_str() {
        "MO" => Some(Weekday::Mon),
        "TU" => Some(Weekday::Tue),
        "WE" => Some(Weekday::Wed),
        "TH" => Some(Weekday::Thu),
        "FR" => Some(Weekday::Fri),
        "SA" => Some(Weekday::Sat),
        "SU" => Some(Weekday::Sun),
        // chrono accepts full and three-letter English day names.
        _ => token.parse::<Weekday>().ok(),
    }
}

fn day_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}
