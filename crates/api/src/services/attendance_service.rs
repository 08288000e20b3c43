//! Check-in / check-out gate. Validates membership against the external
//! oracle, enforces the one-open-session-per-member rule, and ties class
//! check-ins back to the roster.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use infra::db::Db;
use infra::models::{AttendanceSessionRow, SessionType};
use infra::repos::{attendance_sessions, members, CloseError, CreateAttendanceSession};

use super::error::ServiceError;
use super::scheduling_service::SchedulingService;

/// External authority answering whether a member holds a valid membership at
/// a point in time. Billing and renewal live behind this seam.
pub trait MembershipOracle: Send + Sync {
    fn is_membership_active(&self, member_id: Uuid, at: DateTime<Utc>) -> bool;
}

/// Oracle backed by the member directory's expiry field. The comparison is
/// inclusive: a membership expiring at `T` still admits at exactly `T`.
pub struct DirectoryMembershipOracle {
    db: Db,
}

impl DirectoryMembershipOracle {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

impl MembershipOracle for DirectoryMembershipOracle {
    fn is_membership_active(&self, member_id: Uuid, at: DateTime<Utc>) -> bool {
        members::get_by_id(&self.db, member_id)
            .filter(|m| m.is_active)
            .and_then(|m| m.membership_expires_at)
            .is_some_and(|expires_at| at <= expires_at)
    }
}

#[derive(Clone)]
pub struct AttendanceGate {
    db: Db,
    scheduling: SchedulingService,
    oracle: Arc<dyn MembershipOracle>,
}

impl AttendanceGate {
    pub fn new(db: Db, scheduling: SchedulingService, oracle: Arc<dyn MembershipOracle>) -> Self {
        Self {
            db,
            scheduling,
            oracle,
        }
    }

    /// Open an attendance session for a member.
    ///
    /// Order of checks: membership first (no lock needed — the oracle lookup
    /// is the one external read here), then everything that touches shared
    /// state under the member lock: the open-session uniqueness check, the
    /// roster effect for class visits, and the session insert. The store
    /// re-checks uniqueness on insert, so the constraint holds even for
    /// writers that bypass this gate.
    pub fn check_in(
        &self,
        member_id: Uuid,
        session_type: SessionType,
        class_id: Option<Uuid>,
    ) -> Result<AttendanceSessionRow, ServiceError> {
        let now = Utc::now();
        members::get_by_id(&self.db, member_id).ok_or(ServiceError::MemberNotFound)?;
        if !self.oracle.is_membership_active(member_id, now) {
            return Err(ServiceError::NoActiveMembership);
        }

        let lock = self.db.member_lock(member_id);
        let _guard = lock.lock();

        if let Some(open) = attendance_sessions::find_open_for_member(&self.db, member_id) {
            return Err(ServiceError::SessionAlreadyOpen { existing: open.id });
        }

        let class_occurrence_id = match session_type {
            SessionType::GymVisit => None,
            SessionType::ClassAttendance => {
                let class_id = class_id.ok_or(ServiceError::ClassNotFound)?;
                self.scheduling
                    .mark_attended_for_check_in(class_id, member_id, now)?;
                Some(class_id)
            }
        };

        let session = attendance_sessions::create_open(
            &self.db,
            CreateAttendanceSession {
                member_id,
                session_type,
                class_occurrence_id,
            },
        )
        .map_err(|conflict| ServiceError::SessionAlreadyOpen {
            existing: conflict.0.id,
        })?;

        tracing::info!(
            member_id = %member_id,
            session_id = %session.id,
            session_type = %session_type,
            "member checked in"
        );
        Ok(session)
    }

    /// Close an open session. Roster status is untouched — attendance was
    /// recorded at check-in time.
    pub fn check_out(&self, session_id: Uuid) -> Result<AttendanceSessionRow, ServiceError> {
        let session =
            attendance_sessions::close(&self.db, session_id, Utc::now()).map_err(|e| match e {
                CloseError::NotFound => ServiceError::SessionNotFound,
                CloseError::AlreadyClosed => ServiceError::SessionAlreadyClosed,
            })?;
        tracing::info!(session_id = %session_id, "member checked out");
        Ok(session)
    }

    /// Visit history for a member, most recent first. History survives class
    /// soft-deletion.
    pub fn member_sessions(&self, member_id: Uuid) -> Result<Vec<AttendanceSessionRow>, ServiceError> {
        members::get_by_id(&self.db, member_id).ok_or(ServiceError::MemberNotFound)?;
        Ok(attendance_sessions::list_by_member(&self.db, member_id))
    }
}
