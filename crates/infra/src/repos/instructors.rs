use chrono::Utc;
use uuid::Uuid;

use crate::db::Db;
use crate::models::InstructorRow;

pub fn create(db: &Db, display_name: impl Into<String>) -> InstructorRow {
    let now = Utc::now();
    let row = InstructorRow {
        id: Uuid::new_v4(),
        display_name: display_name.into(),
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    db.instructors().write().insert(row.id, row.clone());
    row
}

pub fn get_by_id(db: &Db, id: Uuid) -> Option<InstructorRow> {
    db.instructors().read().get(&id).cloned()
}
