use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::Db;
use crate::models::{RosterEntryRow, RosterStatus};

#[derive(Debug, Clone)]
pub struct CreateRosterEntry {
    pub class_occurrence_id: Uuid,
    pub member_id: Uuid,
    pub status: RosterStatus,
    pub checked_in_at: Option<DateTime<Utc>>,
}

pub fn create(db: &Db, data: CreateRosterEntry) -> RosterEntryRow {
    let now = Utc::now();
    let row = RosterEntryRow {
        id: Uuid::new_v4(),
        class_occurrence_id: data.class_occurrence_id,
        member_id: data.member_id,
        status: data.status,
        booked_at: now,
        checked_in_at: data.checked_in_at,
        created_at: now,
        updated_at: now,
    };
    db.roster_entries().write().insert(row.id, row.clone());
    row
}

pub fn get_by_class_and_member(
    db: &Db,
    class_occurrence_id: Uuid,
    member_id: Uuid,
) -> Option<RosterEntryRow> {
    db.roster_entries()
        .read()
        .values()
        .find(|e| e.class_occurrence_id == class_occurrence_id && e.member_id == member_id)
        .cloned()
}

pub fn list_by_class(db: &Db, class_occurrence_id: Uuid) -> Vec<RosterEntryRow> {
    let mut rows: Vec<RosterEntryRow> = db
        .roster_entries()
        .read()
        .values()
        .filter(|e| e.class_occurrence_id == class_occurrence_id)
        .cloned()
        .collect();
    rows.sort_by_key(|e| e.booked_at);
    rows
}

/// Overwrite an entry's status. Transition legality is the state machine's
/// concern; this is the raw write beneath it. `checked_in_at` is only
/// touched when a new value is supplied.
pub fn update_status(
    db: &Db,
    class_occurrence_id: Uuid,
    member_id: Uuid,
    status: RosterStatus,
    checked_in_at: Option<DateTime<Utc>>,
) -> Option<RosterEntryRow> {
    let mut table = db.roster_entries().write();
    let row = table
        .values_mut()
        .find(|e| e.class_occurrence_id == class_occurrence_id && e.member_id == member_id)?;
    row.status = status;
    if checked_in_at.is_some() {
        row.checked_in_at = checked_in_at;
    }
    row.updated_at = Utc::now();
    Some(row.clone())
}

/// Re-admit a member whose previous entry no longer holds a seat: the entry
/// flips back to the given status with a fresh booking time and a cleared
/// check-in. Keeps the one-entry-per-(class, member) shape intact.
pub fn rebook(
    db: &Db,
    class_occurrence_id: Uuid,
    member_id: Uuid,
    status: RosterStatus,
    checked_in_at: Option<DateTime<Utc>>,
) -> Option<RosterEntryRow> {
    let mut table = db.roster_entries().write();
    let row = table
        .values_mut()
        .find(|e| e.class_occurrence_id == class_occurrence_id && e.member_id == member_id)?;
    let now = Utc::now();
    row.status = status;
    row.booked_at = now;
    row.checked_in_at = checked_in_at;
    row.updated_at = now;
    Some(row.clone())
}
