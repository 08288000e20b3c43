use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Attendance status of one member within one class occurrence.
///
/// `Booked` is the initial state; legal transitions are validated by the
/// roster state machine in the service layer. Entries are never deleted,
/// only transitioned, so history stays queryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RosterStatus {
    Booked,
    Attended,
    NoShow,
    Cancelled,
}

impl RosterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RosterStatus::Booked => "BOOKED",
            RosterStatus::Attended => "ATTENDED",
            RosterStatus::NoShow => "NO_SHOW",
            RosterStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for RosterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RosterStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BOOKED" => Ok(RosterStatus::Booked),
            "ATTENDED" => Ok(RosterStatus::Attended),
            "NO_SHOW" => Ok(RosterStatus::NoShow),
            "CANCELLED" => Ok(RosterStatus::Cancelled),
            _ => Err(format!("Unknown roster status: {}", s)),
        }
    }
}

/// Kind of attendance session: a plain gym visit or a visit tied to a
/// specific class occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionType {
    GymVisit,
    ClassAttendance,
}

impl SessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::GymVisit => "GYM_VISIT",
            SessionType::ClassAttendance => "CLASS_ATTENDANCE",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GYM_VISIT" => Ok(SessionType::GymVisit),
            "CLASS_ATTENDANCE" => Ok(SessionType::ClassAttendance),
            _ => Err(format!("Unknown session type: {}", s)),
        }
    }
}

/// One concrete scheduled class session. Occurrences generated from the same
/// recurring pattern share a `recurrence` descriptor string but are otherwise
/// independent rows; rescheduling one never touches its siblings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassOccurrenceRow {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub instructor_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_capacity: i32,
    pub recurrence: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One member's relationship to one class occurrence. At most one entry per
/// (class, member) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntryRow {
    pub id: Uuid,
    pub class_occurrence_id: Uuid,
    pub member_id: Uuid,
    pub status: RosterStatus,
    pub booked_at: DateTime<Utc>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A gym-visit or class-visit record. `check_out_time` of `None` means the
/// session is still open; a member holds at most one open session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceSessionRow {
    pub id: Uuid,
    pub member_id: Uuid,
    pub session_type: SessionType,
    pub class_occurrence_id: Option<Uuid>,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AttendanceSessionRow {
    pub fn is_open(&self) -> bool {
        self.check_out_time.is_none()
    }
}

/// Member directory record. Only the display fields and the membership
/// expiry matter to this service; member CRUD lives elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub is_active: bool,
    pub membership_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MemberRow {
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

/// Instructor directory record, read-only lookup for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructorRow {
    pub id: Uuid,
    pub display_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
