use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::db::Db;
use crate::models::{AttendanceSessionRow, SessionType};

#[derive(Debug, Clone)]
pub struct CreateAttendanceSession {
    pub member_id: Uuid,
    pub session_type: SessionType,
    pub class_occurrence_id: Option<Uuid>,
}

/// The member already holds an open session; carries that session so callers
/// can report it instead of the one they tried to create.
#[derive(Debug, Error)]
#[error("member {} already has an open session {}", .0.member_id, .0.id)]
pub struct OpenSessionConflict(pub AttendanceSessionRow);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CloseError {
    #[error("attendance session not found")]
    NotFound,
    #[error("attendance session is already closed")]
    AlreadyClosed,
}

/// Open a new session for a member.
///
/// The at-most-one-open-session constraint is enforced here, under the table
/// write lock, so the check and the insert are a single atomic step — the
/// in-memory equivalent of a partial unique index on
/// `(member_id) WHERE check_out_time IS NULL`.
pub fn create_open(
    db: &Db,
    data: CreateAttendanceSession,
) -> Result<AttendanceSessionRow, OpenSessionConflict> {
    let mut table = db.attendance_sessions().write();
    if let Some(open) = table
        .values()
        .find(|s| s.member_id == data.member_id && s.is_open())
    {
        return Err(OpenSessionConflict(open.clone()));
    }
    let now = Utc::now();
    let row = AttendanceSessionRow {
        id: Uuid::new_v4(),
        member_id: data.member_id,
        session_type: data.session_type,
        class_occurrence_id: data.class_occurrence_id,
        check_in_time: now,
        check_out_time: None,
        created_at: now,
        updated_at: now,
    };
    table.insert(row.id, row.clone());
    Ok(row)
}

pub fn get_by_id(db: &Db, id: Uuid) -> Option<AttendanceSessionRow> {
    db.attendance_sessions().read().get(&id).cloned()
}

pub fn find_open_for_member(db: &Db, member_id: Uuid) -> Option<AttendanceSessionRow> {
    db.attendance_sessions()
        .read()
        .values()
        .find(|s| s.member_id == member_id && s.is_open())
        .cloned()
}

/// Full visit history for a member, most recent first.
pub fn list_by_member(db: &Db, member_id: Uuid) -> Vec<AttendanceSessionRow> {
    let mut rows: Vec<AttendanceSessionRow> = db
        .attendance_sessions()
        .read()
        .values()
        .filter(|s| s.member_id == member_id)
        .cloned()
        .collect();
    rows.sort_by_key(|s| std::cmp::Reverse(s.check_in_time));
    rows
}

pub fn close(db: &Db, id: Uuid, now: DateTime<Utc>) -> Result<AttendanceSessionRow, CloseError> {
    let mut table = db.attendance_sessions().write();
    let row = table.get_mut(&id).ok_or(CloseError::NotFound)?;
    if row.check_out_time.is_some() {
        return Err(CloseError::AlreadyClosed);
    }
    row.check_out_time = Some(now);
    row.updated_at = now;
    Ok(row.clone())
}
