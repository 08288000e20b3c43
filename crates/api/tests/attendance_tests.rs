mod common;

use chrono::{Duration, Utc};

use api::services::{DirectoryMembershipOracle, MembershipOracle, ServiceError};
use common::*;
use infra::models::{RosterStatus, SessionType};
use uuid::Uuid;

#[test]
fn membership_expiring_exactly_now_still_admits() {
    let state = test_state();
    let expiry = Utc::now() + Duration::hours(1);
    let member = create_test_member_with_expiry(&state, "edge@example.com", Some(expiry));
    let oracle = DirectoryMembershipOracle::new(state.db.clone());

    // The final valid instant is inclusive; one second past it is not.
    assert!(oracle.is_membership_active(member, expiry));
    assert!(!oracle.is_membership_active(member, expiry + Duration::seconds(1)));
    assert!(oracle.is_membership_active(member, expiry - Duration::days(10)));
}

#[test]
fn check_in_requires_an_active_membership() {
    let state = test_state();
    let expired = create_test_member(&state, "expired@example.com", -1);
    let no_membership = create_test_member_with_expiry(&state, "none@example.com", None);

    for member in [expired, no_membership] {
        assert_eq!(
            state
                .attendance
                .check_in(member, SessionType::GymVisit, None)
                .unwrap_err(),
            ServiceError::NoActiveMembership
        );
        assert!(state.attendance.member_sessions(member).unwrap().is_empty());
    }
}

#[test]
fn renewing_an_expired_membership_reopens_the_door() {
    let state = test_state();
    let member = create_test_member(&state, "renewed@example.com", -1);

    assert_eq!(
        state
            .attendance
            .check_in(member, SessionType::GymVisit, None)
            .unwrap_err(),
        ServiceError::NoActiveMembership
    );

    infra::repos::members::set_membership_expiry(
        &state.db,
        member,
        Some(Utc::now() + Duration::days(30)),
    )
    .unwrap();

    let session = state
        .attendance
        .check_in(member, SessionType::GymVisit, None)
        .unwrap();
    let stored = infra::repos::attendance_sessions::get_by_id(&state.db, session.id).unwrap();
    assert!(stored.is_open());
}

#[test]
fn unknown_member_cannot_check_in() {
    let state = test_state();
    assert_eq!(
        state
            .attendance
            .check_in(Uuid::new_v4(), SessionType::GymVisit, None)
            .unwrap_err(),
        ServiceError::MemberNotFound
    );
}

#[test]
fn gym_visit_opens_a_session_and_double_check_in_is_refused() {
    let state = test_state();
    let member = create_test_member(&state, "gym@example.com", 30);

    let session = state
        .attendance
        .check_in(member, SessionType::GymVisit, None)
        .unwrap();
    assert!(session.is_open());
    assert_eq!(session.session_type, SessionType::GymVisit);
    assert!(session.class_occurrence_id.is_none());

    let err = state
        .attendance
        .check_in(member, SessionType::GymVisit, None)
        .unwrap_err();
    assert_eq!(
        err,
        ServiceError::SessionAlreadyOpen {
            existing: session.id,
        }
    );

    // No second session came into being.
    assert_eq!(state.attendance.member_sessions(member).unwrap().len(), 1);
}

#[test]
fn check_out_closes_the_session_once() {
    let state = test_state();
    let member = create_test_member(&state, "out@example.com", 30);
    let session = state
        .attendance
        .check_in(member, SessionType::GymVisit, None)
        .unwrap();

    let closed = state.attendance.check_out(session.id).unwrap();
    assert!(closed.check_out_time.is_some());

    assert_eq!(
        state.attendance.check_out(session.id).unwrap_err(),
        ServiceError::SessionAlreadyClosed
    );
    assert_eq!(
        state.attendance.check_out(Uuid::new_v4()).unwrap_err(),
        ServiceError::SessionNotFound
    );
}

#[test]
fn member_can_check_in_again_after_checking_out() {
    let state = test_state();
    let member = create_test_member(&state, "again@example.com", 30);

    let first = state
        .attendance
        .check_in(member, SessionType::GymVisit, None)
        .unwrap();
    state.attendance.check_out(first.id).unwrap();
    let second = state
        .attendance
        .check_in(member, SessionType::GymVisit, None)
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(state.attendance.member_sessions(member).unwrap().len(), 2);
}

#[test]
fn class_check_in_marks_the_booked_entry_attended() {
    let state = test_state();
    let class = create_test_class(&state, "Spin", 10);
    let member = create_test_member(&state, "spin@example.com", 30);
    state
        .scheduling
        .add_member_to_roster(class.id, member)
        .unwrap();

    let session = state
        .attendance
        .check_in(member, SessionType::ClassAttendance, Some(class.id))
        .unwrap();
    assert_eq!(session.class_occurrence_id, Some(class.id));

    let roster = state.scheduling.class_roster(class.id).unwrap();
    assert_eq!(roster[0].entry.status, RosterStatus::Attended);
    assert!(roster[0].entry.checked_in_at.is_some());
}

#[test]
fn class_check_in_admits_a_walk_in_when_there_is_room() {
    let state = test_state();
    let class = create_test_class(&state, "Open Gym Class", 2);
    let walk_in = create_test_member(&state, "walkin@example.com", 30);

    let session = state
        .attendance
        .check_in(walk_in, SessionType::ClassAttendance, Some(class.id))
        .unwrap();
    assert!(session.is_open());

    let roster = state.scheduling.class_roster(class.id).unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].entry.status, RosterStatus::Attended);
}

#[test]
fn class_check_in_refuses_a_walk_in_when_full_and_opens_no_session() {
    let state = test_state();
    let class = create_test_class(&state, "Tiny", 1);
    let seated = create_test_member(&state, "seated@example.com", 30);
    let walk_in = create_test_member(&state, "late@example.com", 30);
    state
        .scheduling
        .add_member_to_roster(class.id, seated)
        .unwrap();

    let err = state
        .attendance
        .check_in(walk_in, SessionType::ClassAttendance, Some(class.id))
        .unwrap_err();
    assert_eq!(err, ServiceError::ClassFull);

    // The failed check-in must not leave a half-open session behind.
    assert!(state.attendance.member_sessions(walk_in).unwrap().is_empty());
}

#[test]
fn class_check_in_requires_a_class_id() {
    let state = test_state();
    let member = create_test_member(&state, "lost@example.com", 30);
    assert_eq!(
        state
            .attendance
            .check_in(member, SessionType::ClassAttendance, None)
            .unwrap_err(),
        ServiceError::ClassNotFound
    );
}

#[test]
fn attendance_history_survives_class_soft_deletion() {
    let state = test_state();
    let class = create_test_class(&state, "Archived", 5);
    let member = create_test_member(&state, "history@example.com", 30);
    state
        .scheduling
        .add_member_to_roster(class.id, member)
        .unwrap();

    let session = state
        .attendance
        .check_in(member, SessionType::ClassAttendance, Some(class.id))
        .unwrap();
    state.attendance.check_out(session.id).unwrap();
    state.scheduling.delete_class(class.id).unwrap();

    let history = state.attendance.member_sessions(member).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].class_occurrence_id, Some(class.id));
    assert!(history[0].check_out_time.is_some());
}

#[test]
fn wire_shapes_use_screaming_snake_case_tags() {
    let state = test_state();
    let class = create_test_class(&state, "Serde", 5);
    let member = create_test_member(&state, "wire@example.com", 30);
    let entry = state
        .scheduling
        .add_member_to_roster(class.id, member)
        .unwrap();
    let session = state
        .attendance
        .check_in(member, SessionType::GymVisit, None)
        .unwrap();

    let entry_json = serde_json::to_value(&entry).unwrap();
    assert_eq!(entry_json["status"], "BOOKED");
    let session_json = serde_json::to_value(&session).unwrap();
    assert_eq!(session_json["session_type"], "GYM_VISIT");
    assert!(session_json["check_out_time"].is_null());
}
