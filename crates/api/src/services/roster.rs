//! Roster attendance state machine.
//!
//! States: `Booked` (initial), `Attended`, `NoShow`, `Cancelled`. An entry is
//! never deleted; cancellation is a transition, and recorded attendance is
//! immutable (`Attended` never moves again).

use chrono::{DateTime, Utc};

use infra::models::{ClassOccurrenceRow, RosterStatus};

use super::error::ServiceError;

/// Validate a requested status change against the transition table.
///
/// Returns `Ok(true)` when the entry should be rewritten, `Ok(false)` for a
/// same-state request (a no-op, not an error). Illegal transitions fail with
/// `InvalidTransition` naming both states and leave nothing mutated.
///
/// `Booked -> NoShow` is a post-hoc staff marking and is only legal once the
/// occurrence has ended.
pub fn validate_transition(
    current: RosterStatus,
    target: RosterStatus,
    occurrence: &ClassOccurrenceRow,
    now: DateTime<Utc>,
) -> Result<bool, ServiceError> {
    if current == target {
        return Ok(false);
    }
    let legal = match (current, target) {
        (RosterStatus::Booked, RosterStatus::Attended) => true,
        (RosterStatus::Booked, RosterStatus::NoShow) => now > occurrence.end_time,
        (RosterStatus::Booked, RosterStatus::Cancelled) => true,
        _ => false,
    };
    if legal {
        Ok(true)
    } else {
        Err(ServiceError::InvalidTransition {
            from: current,
            to: target,
        })
    }
}
