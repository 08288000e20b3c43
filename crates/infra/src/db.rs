use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use crate::models::{
    AttendanceSessionRow, ClassOccurrenceRow, InstructorRow, MemberRow, RosterEntryRow,
};

/// Registry of per-key mutexes.
///
/// Read-then-write sequences on contended state (capacity admission, the
/// open-session check) take the key's lock so that two concurrent requests
/// cannot both observe "room available" and both commit. Locks are created
/// lazily per key and shared via `Arc`, so mutations on different keys never
/// serialize against each other.
#[derive(Default)]
pub struct LockMap {
    locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl LockMap {
    /// Get (or create) the lock for `key`. Callers hold the returned `Arc`
    /// and lock it for the duration of the critical section.
    pub fn acquire(&self, key: Uuid) -> Arc<Mutex<()>> {
        self.locks.lock().entry(key).or_default().clone()
    }
}

#[derive(Default)]
struct Tables {
    class_occurrences: RwLock<HashMap<Uuid, ClassOccurrenceRow>>,
    roster_entries: RwLock<HashMap<Uuid, RosterEntryRow>>,
    attendance_sessions: RwLock<HashMap<Uuid, AttendanceSessionRow>>,
    members: RwLock<HashMap<Uuid, MemberRow>>,
    instructors: RwLock<HashMap<Uuid, InstructorRow>>,
}

/// Cloneable handle to the in-process store.
///
/// Each table sits behind its own `RwLock`; a repository function that must
/// check a constraint and insert atomically does so under the table's write
/// lock. Cross-table sequences are serialized by the per-class and per-member
/// `LockMap`s, which callers acquire before reading.
#[derive(Clone, Default)]
pub struct Db {
    inner: Arc<DbInner>,
}

#[derive(Default)]
struct DbInner {
    tables: Tables,
    class_locks: LockMap,
    member_locks: LockMap,
}

impl Db {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutual-exclusion scope for roster/capacity mutations of one class.
    pub fn class_lock(&self, class_id: Uuid) -> Arc<Mutex<()>> {
        self.inner.class_locks.acquire(class_id)
    }

    /// Mutual-exclusion scope for one member's open-session bookkeeping.
    pub fn member_lock(&self, member_id: Uuid) -> Arc<Mutex<()>> {
        self.inner.member_locks.acquire(member_id)
    }

    pub(crate) fn class_occurrences(&self) -> &RwLock<HashMap<Uuid, ClassOccurrenceRow>> {
        &self.inner.tables.class_occurrences
    }

    pub(crate) fn roster_entries(&self) -> &RwLock<HashMap<Uuid, RosterEntryRow>> {
        &self.inner.tables.roster_entries
    }

    pub(crate) fn attendance_sessions(&self) -> &RwLock<HashMap<Uuid, AttendanceSessionRow>> {
        &self.inner.tables.attendance_sessions
    }

    pub(crate) fn members(&self) -> &RwLock<HashMap<Uuid, MemberRow>> {
        &self.inner.tables.members
    }

    pub(crate) fn instructors(&self) -> &RwLock<HashMap<Uuid, InstructorRow>> {
        &self.inner.tables.instructors
    }
}
