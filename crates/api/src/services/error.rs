use infra::models::RosterStatus;
use thiserror::Error;
use uuid::Uuid;

/// Closed enumeration of the expected, recoverable failures of the
/// scheduling and attendance engine. Callers surface these to the end user;
/// anything else escaping the engine is a bug, not a business outcome.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error("start time must be before end time")]
    InvalidTimeWindow,

    #[error("capacity must be at least 1")]
    InvalidCapacity,

    #[error("capacity {requested} is below the confirmed roster count {confirmed}")]
    CapacityBelowRoster { requested: i32, confirmed: i32 },

    #[error("class is full")]
    ClassFull,

    #[error("member is already booked for this class")]
    AlreadyBooked,

    #[error("cannot transition roster entry from {from} to {to}")]
    InvalidTransition { from: RosterStatus, to: RosterStatus },

    #[error("member has no active membership")]
    NoActiveMembership,

    #[error("member already has an open attendance session {existing}")]
    SessionAlreadyOpen { existing: Uuid },

    #[error("attendance session not found")]
    SessionNotFound,

    #[error("attendance session is already closed")]
    SessionAlreadyClosed,

    #[error("class not found")]
    ClassNotFound,

    #[error("member not found")]
    MemberNotFound,

    #[error("roster entry not found")]
    RosterEntryNotFound,
}

impl ServiceError {
    /// Stable machine-readable tag for transports and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::InvalidTimeWindow => "INVALID_TIME_WINDOW",
            ServiceError::InvalidCapacity => "INVALID_CAPACITY",
            ServiceError::CapacityBelowRoster { .. } => "CAPACITY_BELOW_ROSTER",
            ServiceError::ClassFull => "CLASS_FULL",
            ServiceError::AlreadyBooked => "ALREADY_BOOKED",
            ServiceError::InvalidTransition { .. } => "INVALID_TRANSITION",
            ServiceError::NoActiveMembership => "NO_ACTIVE_MEMBERSHIP",
            ServiceError::SessionAlreadyOpen { .. } => "SESSION_ALREADY_OPEN",
            ServiceError::SessionNotFound => "SESSION_NOT_FOUND",
            ServiceError::SessionAlreadyClosed => "SESSION_ALREADY_CLOSED",
            ServiceError::ClassNotFound => "CLASS_NOT_FOUND",
            ServiceError::MemberNotFound => "MEMBER_NOT_FOUND",
            ServiceError::RosterEntryNotFound => "ROSTER_ENTRY_NOT_FOUND",
        }
    }
}
