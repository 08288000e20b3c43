pub mod attendance_service;
pub mod capacity;
pub mod error;
pub mod recurrence;
pub mod roster;
pub mod scheduling_service;

pub use attendance_service::{AttendanceGate, DirectoryMembershipOracle, MembershipOracle};
pub use error::ServiceError;
pub use scheduling_service::{
    CreateClassParams, OccurrenceSummary, RecurrenceParams, RosterMemberView, SchedulingService,
    UpdateClassParams,
};
