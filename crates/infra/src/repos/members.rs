use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::Db;
use crate::models::MemberRow;

#[derive(Debug, Clone)]
pub struct CreateMember {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub membership_expires_at: Option<DateTime<Utc>>,
}

pub fn create(db: &Db, data: CreateMember) -> MemberRow {
    let now = Utc::now();
    let row = MemberRow {
        id: Uuid::new_v4(),
        first_name: data.first_name,
        last_name: data.last_name,
        email: data.email,
        is_active: true,
        membership_expires_at: data.membership_expires_at,
        created_at: now,
        updated_at: now,
    };
    db.members().write().insert(row.id, row.clone());
    row
}

pub fn get_by_id(db: &Db, id: Uuid) -> Option<MemberRow> {
    db.members().read().get(&id).cloned()
}

pub fn set_membership_expiry(
    db: &Db,
    id: Uuid,
    expires_at: Option<DateTime<Utc>>,
) -> Option<MemberRow> {
    let mut table = db.members().write();
    let row = table.get_mut(&id)?;
    row.membership_expires_at = expires_at;
    row.updated_at = Utc::now();
    Some(row.clone())
}
