//! Seat-capacity math. Pure computation: occupancy is always derived from
//! the live roster, never stored, so it cannot drift from the entries. All
//! mutation happens elsewhere, under the per-class lock, which re-checks
//! `can_admit` immediately before committing.

use infra::models::{ClassOccurrenceRow, RosterEntryRow, RosterStatus};

/// Whether a roster entry in this status holds one of the class's seats.
/// Cancelled and no-show entries free their slot.
pub fn holds_seat(status: RosterStatus) -> bool {
    matches!(status, RosterStatus::Booked | RosterStatus::Attended)
}

/// Number of seat-holding entries in a roster.
pub fn confirmed_count(entries: &[RosterEntryRow]) -> i32 {
    entries.iter().filter(|e| holds_seat(e.status)).count() as i32
}

/// Occupancy as a whole percentage of capacity, clamped to `0..=100`.
/// A non-positive capacity is a degenerate configuration and reads as 0
/// rather than dividing by zero.
pub fn occupancy(occurrence: &ClassOccurrenceRow, confirmed: i32) -> u8 {
    if occurrence.max_capacity <= 0 {
        return 0;
    }
    let pct = (confirmed as f64 / occurrence.max_capacity as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// True iff one more seat can be handed out.
pub fn can_admit(occurrence: &ClassOccurrenceRow, confirmed: i32) -> bool {
    confirmed < occurrence.max_capacity
}
