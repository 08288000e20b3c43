pub mod attendance_sessions;
pub mod class_occurrences;
pub mod instructors;
pub mod members;
pub mod roster_entries;

pub use attendance_sessions::{CloseError, CreateAttendanceSession, OpenSessionConflict};
pub use class_occurrences::{CreateClassOccurrence, UpdateClassOccurrence};
pub use members::CreateMember;
pub use roster_entries::CreateRosterEntry;
