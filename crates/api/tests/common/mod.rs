#![allow(dead_code)]

use std::num::NonZeroU32;

use chrono::{DateTime, Duration, TimeZone, Utc, Weekday};
use uuid::Uuid;

use api::services::scheduling_service::{CreateClassParams, RecurrenceParams};
use api::state::AppState;
use infra::db::Db;
use infra::models::ClassOccurrenceRow;
use infra::repos::{instructors, members, CreateMember};

pub fn test_state() -> AppState {
    AppState::new(Db::new())
}

/// Member whose membership runs out `expires_in_days` from now (negative for
/// an already-expired membership).
pub fn create_test_member(state: &AppState, email: &str, expires_in_days: i64) -> Uuid {
    create_test_member_with_expiry(state, email, Some(Utc::now() + Duration::days(expires_in_days)))
}

pub fn create_test_member_with_expiry(
    state: &AppState,
    email: &str,
    expires_at: Option<DateTime<Utc>>,
) -> Uuid {
    members::create(
        &state.db,
        CreateMember {
            first_name: email.split('@').next().unwrap_or("Test").to_string(),
            last_name: Some("Member".to_string()),
            email: email.to_string(),
            membership_expires_at: expires_at,
        },
    )
    .id
}

pub fn create_test_instructor(state: &AppState) -> Uuid {
    instructors::create(&state.db, "Test Instructor").id
}

/// A fixed Monday anchor so weekday-sensitive assertions stay deterministic.
pub fn monday_anchor(hour: u32) -> DateTime<Utc> {
    // 2025-01-06 is a Monday.
    Utc.with_ymd_and_hms(2025, 1, 6, hour, 0, 0).unwrap()
}

pub fn class_params(
    name: &str,
    instructor_id: Uuid,
    start: DateTime<Utc>,
    capacity: i32,
) -> CreateClassParams {
    CreateClassParams {
        name: name.to_string(),
        category: "strength".to_string(),
        instructor_id,
        start_time: start,
        end_time: start + Duration::hours(1),
        max_capacity: capacity,
        recurring: None,
    }
}

pub fn recurring(days: Vec<Weekday>, count: u32) -> Option<RecurrenceParams> {
    Some(RecurrenceParams {
        days_of_week: days,
        count: NonZeroU32::new(count).expect("count must be nonzero"),
    })
}

/// Single occurrence starting tomorrow, one hour long.
pub fn create_test_class(state: &AppState, name: &str, capacity: i32) -> ClassOccurrenceRow {
    let instructor_id = create_test_instructor(state);
    let start = Utc::now() + Duration::days(1);
    state
        .scheduling
        .create_class(class_params(name, instructor_id, start, capacity))
        .expect("test class should be created")
        .remove(0)
}

/// Single occurrence that already ended, for post-hoc transitions.
pub fn create_past_class(state: &AppState, name: &str, capacity: i32) -> ClassOccurrenceRow {
    let instructor_id = create_test_instructor(state);
    let start = Utc::now() - Duration::hours(2);
    state
        .scheduling
        .create_class(class_params(name, instructor_id, start, capacity))
        .expect("test class should be created")
        .remove(0)
}
