mod common;

use chrono::{Duration, Utc};

use api::services::roster::validate_transition;
use api::services::ServiceError;
use common::{create_test_class, create_test_member, test_state};
use infra::models::{ClassOccurrenceRow, RosterStatus};
use uuid::Uuid;

/// Occurrence row ending at `now + offset_minutes`, for exercising the
/// time-gated transitions without a full service setup.
fn occurrence_ending_in(offset_minutes: i64) -> ClassOccurrenceRow {
    let now = Utc::now();
    let end = now + Duration::minutes(offset_minutes);
    ClassOccurrenceRow {
        id: Uuid::new_v4(),
        name: "Spin".to_string(),
        category: "cardio".to_string(),
        instructor_id: Uuid::new_v4(),
        start_time: end - Duration::hours(1),
        end_time: end,
        max_capacity: 10,
        recurrence: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn booked_can_become_attended() {
    let class = occurrence_ending_in(60);
    let result = validate_transition(
        RosterStatus::Booked,
        RosterStatus::Attended,
        &class,
        Utc::now(),
    );
    assert_eq!(result, Ok(true));
}

#[test]
fn booked_can_be_cancelled() {
    let class = occurrence_ending_in(60);
    let result = validate_transition(
        RosterStatus::Booked,
        RosterStatus::Cancelled,
        &class,
        Utc::now(),
    );
    assert_eq!(result, Ok(true));
}

#[test]
fn no_show_requires_the_occurrence_to_have_ended() {
    let upcoming = occurrence_ending_in(60);
    let result = validate_transition(
        RosterStatus::Booked,
        RosterStatus::NoShow,
        &upcoming,
        Utc::now(),
    );
    assert_eq!(
        result,
        Err(ServiceError::InvalidTransition {
            from: RosterStatus::Booked,
            to: RosterStatus::NoShow,
        })
    );

    let finished = occurrence_ending_in(-10);
    let result = validate_transition(
        RosterStatus::Booked,
        RosterStatus::NoShow,
        &finished,
        Utc::now(),
    );
    assert_eq!(result, Ok(true));
}

#[test]
fn attended_is_immutable() {
    let class = occurrence_ending_in(-10);
    for target in [RosterStatus::Cancelled, RosterStatus::NoShow, RosterStatus::Booked] {
        let result = validate_transition(RosterStatus::Attended, target, &class, Utc::now());
        assert_eq!(
            result,
            Err(ServiceError::InvalidTransition {
                from: RosterStatus::Attended,
                to: target,
            }),
            "ATTENDED must not move to {target}"
        );
    }
}

#[test]
fn cancelled_is_terminal() {
    let class = occurrence_ending_in(60);
    for target in [RosterStatus::Booked, RosterStatus::Attended, RosterStatus::NoShow] {
        let result = validate_transition(RosterStatus::Cancelled, target, &class, Utc::now());
        assert!(result.is_err(), "CANCELLED must not move to {target}");
    }
}

#[test]
fn same_state_transition_is_a_noop_not_an_error() {
    let class = occurrence_ending_in(60);
    for status in [
        RosterStatus::Booked,
        RosterStatus::Attended,
        RosterStatus::NoShow,
        RosterStatus::Cancelled,
    ] {
        assert_eq!(validate_transition(status, status, &class, Utc::now()), Ok(false));
    }
}

#[test]
fn illegal_transition_through_the_service_leaves_the_entry_unchanged() {
    let state = test_state();
    let class = create_test_class(&state, "Pilates", 5);
    let member = create_test_member(&state, "anna@example.com", 30);

    state
        .scheduling
        .add_member_to_roster(class.id, member)
        .unwrap();
    let attended = state
        .scheduling
        .update_roster_status(class.id, member, RosterStatus::Attended)
        .unwrap();
    assert_eq!(attended.status, RosterStatus::Attended);
    assert!(attended.checked_in_at.is_some());

    let err = state
        .scheduling
        .update_roster_status(class.id, member, RosterStatus::Cancelled)
        .unwrap_err();
    assert_eq!(
        err,
        ServiceError::InvalidTransition {
            from: RosterStatus::Attended,
            to: RosterStatus::Cancelled,
        }
    );

    let roster = state.scheduling.class_roster(class.id).unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].entry.status, RosterStatus::Attended);
}
