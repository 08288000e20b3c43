use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::Db;
use crate::models::ClassOccurrenceRow;

#[derive(Debug, Clone)]
pub struct CreateClassOccurrence {
    pub name: String,
    pub category: String,
    pub instructor_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_capacity: i32,
    pub recurrence: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateClassOccurrence {
    pub name: Option<String>,
    pub category: Option<String>,
    pub instructor_id: Option<Uuid>,
    pub max_capacity: Option<i32>,
    pub is_active: Option<bool>,
}

pub fn create(db: &Db, data: CreateClassOccurrence) -> ClassOccurrenceRow {
    let now = Utc::now();
    let row = ClassOccurrenceRow {
        id: Uuid::new_v4(),
        name: data.name,
        category: data.category,
        instructor_id: data.instructor_id,
        start_time: data.start_time,
        end_time: data.end_time,
        max_capacity: data.max_capacity,
        recurrence: data.recurrence,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    db.class_occurrences().write().insert(row.id, row.clone());
    row
}

pub fn get_by_id(db: &Db, id: Uuid) -> Option<ClassOccurrenceRow> {
    db.class_occurrences().read().get(&id).cloned()
}

/// Active occurrences whose start time falls within `[from, to)`, ordered by
/// start time.
pub fn list_in_window(db: &Db, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<ClassOccurrenceRow> {
    let mut rows: Vec<ClassOccurrenceRow> = db
        .class_occurrences()
        .read()
        .values()
        .filter(|c| c.is_active && c.start_time >= from && c.start_time < to)
        .cloned()
        .collect();
    rows.sort_by_key(|c| c.start_time);
    rows
}

pub fn update(db: &Db, id: Uuid, data: UpdateClassOccurrence) -> Option<ClassOccurrenceRow> {
    let mut table = db.class_occurrences().write();
    let row = table.get_mut(&id)?;
    if let Some(name) = data.name {
        row.name = name;
    }
    if let Some(category) = data.category {
        row.category = category;
    }
    if let Some(instructor_id) = data.instructor_id {
        row.instructor_id = instructor_id;
    }
    if let Some(max_capacity) = data.max_capacity {
        row.max_capacity = max_capacity;
    }
    if let Some(is_active) = data.is_active {
        row.is_active = is_active;
    }
    row.updated_at = Utc::now();
    Some(row.clone())
}

/// Change the timing of exactly one occurrence. Sibling occurrences from the
/// same recurring series are untouched.
pub fn reschedule(
    db: &Db,
    id: Uuid,
    new_start: DateTime<Utc>,
    new_end: DateTime<Utc>,
) -> Option<ClassOccurrenceRow> {
    let mut table = db.class_occurrences().write();
    let row = table.get_mut(&id)?;
    row.start_time = new_start;
    row.end_time = new_end;
    row.updated_at = Utc::now();
    Some(row.clone())
}

/// Soft delete / restore. Rows are never removed, so roster and attendance
/// history stays queryable.
pub fn set_active(db: &Db, id: Uuid, is_active: bool) -> Option<ClassOccurrenceRow> {
    let mut table = db.class_occurrences().write();
    let row = table.get_mut(&id)?;
    row.is_active = is_active;
    row.updated_at = Utc::now();
    Some(row.clone())
}
