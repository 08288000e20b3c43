//! Class lifecycle orchestration: creation (single or recurring), updates,
//! rescheduling, soft deletion, and every roster mutation. Capacity
//! admission re-checks happen here, under the per-class lock, immediately
//! before a roster write commits.

use std::num::NonZeroU32;

use chrono::{DateTime, Utc, Weekday};
use uuid::Uuid;

use infra::db::Db;
use infra::models::{ClassOccurrenceRow, RosterEntryRow, RosterStatus};
use infra::repos::{
    class_occurrences, instructors, members, roster_entries, CreateClassOccurrence,
    CreateRosterEntry, UpdateClassOccurrence,
};

use super::error::ServiceError;
use super::{capacity, recurrence, roster};

/// Parameters for creating a class, either one occurrence or a weekly
/// repeating series.
#[derive(Debug, Clone)]
pub struct CreateClassParams {
    pub name: String,
    pub category: String,
    pub instructor_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_capacity: i32,
    pub recurring: Option<RecurrenceParams>,
}

/// Weekly repetition request. An empty day set defaults to the weekday of
/// the class's start time.
#[derive(Debug, Clone)]
pub struct RecurrenceParams {
    pub days_of_week: Vec<Weekday>,
    pub count: NonZeroU32,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateClassParams {
    pub name: Option<String>,
    pub category: Option<String>,
    pub instructor_id: Option<Uuid>,
    pub max_capacity: Option<i32>,
    pub is_active: Option<bool>,
}

/// One occurrence with its live-computed roster figures, for listings.
#[derive(Debug, Clone)]
pub struct OccurrenceSummary {
    pub occurrence: ClassOccurrenceRow,
    pub instructor_name: Option<String>,
    pub confirmed_count: i32,
    pub occupancy_pct: u8,
}

/// One roster entry joined with the member directory's display fields.
#[derive(Debug, Clone)]
pub struct RosterMemberView {
    pub entry: RosterEntryRow,
    pub member_name: Option<String>,
    pub member_email: Option<String>,
}

#[derive(Clone)]
pub struct SchedulingService {
    db: Db,
}

impl SchedulingService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Create one class occurrence, or — when `recurring` is set — one per
    /// expanded slot of the weekly pattern, all sharing the same descriptor
    /// string. Returns the created rows in chronological order.
    pub fn create_class(
        &self,
        params: CreateClassParams,
    ) -> Result<Vec<ClassOccurrenceRow>, ServiceError> {
        validate_window(params.start_time, params.end_time)?;
        if params.max_capacity < 1 {
            return Err(ServiceError::InvalidCapacity);
        }

        let rows = match &params.recurring {
            None => vec![class_occurrences::create(
                &self.db,
                CreateClassOccurrence {
                    name: params.name.clone(),
                    category: params.category.clone(),
                    instructor_id: params.instructor_id,
                    start_time: params.start_time,
                    end_time: params.end_time,
                    max_capacity: params.max_capacity,
                    recurrence: None,
                },
            )],
            Some(rec) => {
                let descriptor = recurrence::build_descriptor(
                    params.start_time,
                    &rec.days_of_week,
                    rec.count.get(),
                );
                let slots = recurrence::expand(
                    &rec.days_of_week,
                    rec.count.get(),
                    params.start_time,
                    params.end_time,
                );
                slots
                    .into_iter()
                    .map(|(start, end)| {
                        class_occurrences::create(
                            &self.db,
                            CreateClassOccurrence {
                                name: params.name.clone(),
                                category: params.category.clone(),
                                instructor_id: params.instructor_id,
                                start_time: start,
                                end_time: end,
                                max_capacity: params.max_capacity,
                                recurrence: Some(descriptor.clone()),
                            },
                        )
                    })
                    .collect()
            }
        };

        tracing::info!(
            name = %params.name,
            occurrences = rows.len(),
            "created class"
        );
        Ok(rows)
    }

    pub fn get_class(&self, id: Uuid) -> Result<ClassOccurrenceRow, ServiceError> {
        class_occurrences::get_by_id(&self.db, id).ok_or(ServiceError::ClassNotFound)
    }

    /// Partial update of one occurrence. Shrinking capacity below the
    /// current confirmed roster count is refused; the check and the write
    /// share the class lock so a racing booking cannot slip between them.
    pub fn update_class(
        &self,
        id: Uuid,
        params: UpdateClassParams,
    ) -> Result<ClassOccurrenceRow, ServiceError> {
        let lock = self.db.class_lock(id);
        let _guard = lock.lock();

        class_occurrences::get_by_id(&self.db, id).ok_or(ServiceError::ClassNotFound)?;
        if let Some(requested) = params.max_capacity {
            if requested < 1 {
                return Err(ServiceError::InvalidCapacity);
            }
            let entries = roster_entries::list_by_class(&self.db, id);
            let confirmed = capacity::confirmed_count(&entries);
            if requested < confirmed {
                return Err(ServiceError::CapacityBelowRoster {
                    requested,
                    confirmed,
                });
            }
        }

        class_occurrences::update(
            &self.db,
            id,
            UpdateClassOccurrence {
                name: params.name,
                category: params.category,
                instructor_id: params.instructor_id,
                max_capacity: params.max_capacity,
                is_active: params.is_active,
            },
        )
        .ok_or(ServiceError::ClassNotFound)
    }

    /// Move one occurrence to a new window. Siblings generated from the same
    /// recurrence descriptor are left alone.
    pub fn reschedule_class(
        &self,
        id: Uuid,
        new_start: DateTime<Utc>,
        new_end: DateTime<Utc>,
    ) -> Result<ClassOccurrenceRow, ServiceError> {
        validate_window(new_start, new_end)?;
        let row = class_occurrences::reschedule(&self.db, id, new_start, new_end)
            .ok_or(ServiceError::ClassNotFound)?;
        tracing::info!(class_id = %id, start = %new_start, "rescheduled class");
        Ok(row)
    }

    /// Soft delete: the occurrence disappears from listings but its roster
    /// and attendance history stay on record.
    pub fn delete_class(&self, id: Uuid) -> Result<ClassOccurrenceRow, ServiceError> {
        let row =
            class_occurrences::set_active(&self.db, id, false).ok_or(ServiceError::ClassNotFound)?;
        tracing::info!(class_id = %id, "soft-deleted class");
        Ok(row)
    }

    /// Book a member into a class.
    ///
    /// Admission is decided under the class lock: the confirmed count is
    /// recomputed there, so of N concurrent bookings racing for the last
    /// seat exactly one wins and the rest get `ClassFull`. A member whose
    /// previous entry was cancelled (or marked no-show) is re-admitted on
    /// the same entry, keeping one entry per (class, member) pair.
    pub fn add_member_to_roster(
        &self,
        class_id: Uuid,
        member_id: Uuid,
    ) -> Result<RosterEntryRow, ServiceError> {
        members::get_by_id(&self.db, member_id).ok_or(ServiceError::MemberNotFound)?;

        let lock = self.db.class_lock(class_id);
        let _guard = lock.lock();

        let class = self.active_class(class_id)?;
        let entries = roster_entries::list_by_class(&self.db, class_id);
        let existing = entries.iter().find(|e| e.member_id == member_id);
        if let Some(entry) = existing {
            if capacity::holds_seat(entry.status) {
                return Err(ServiceError::AlreadyBooked);
            }
        }

        if !capacity::can_admit(&class, capacity::confirmed_count(&entries)) {
            return Err(ServiceError::ClassFull);
        }

        let entry = match existing {
            Some(_) => {
                roster_entries::rebook(&self.db, class_id, member_id, RosterStatus::Booked, None)
                    .ok_or(ServiceError::RosterEntryNotFound)?
            }
            None => roster_entries::create(
                &self.db,
                CreateRosterEntry {
                    class_occurrence_id: class_id,
                    member_id,
                    status: RosterStatus::Booked,
                    checked_in_at: None,
                },
            ),
        };
        tracing::info!(class_id = %class_id, member_id = %member_id, "booked member");
        Ok(entry)
    }

    /// Apply a roster status change through the state machine; its errors
    /// propagate unchanged. Cancelling a booked entry frees its seat
    /// immediately, since capacity is computed from the live roster.
    pub fn update_roster_status(
        &self,
        class_id: Uuid,
        member_id: Uuid,
        target: RosterStatus,
    ) -> Result<RosterEntryRow, ServiceError> {
        let lock = self.db.class_lock(class_id);
        let _guard = lock.lock();

        let class =
            class_occurrences::get_by_id(&self.db, class_id).ok_or(ServiceError::ClassNotFound)?;
        let entry = roster_entries::get_by_class_and_member(&self.db, class_id, member_id)
            .ok_or(ServiceError::RosterEntryNotFound)?;

        let now = Utc::now();
        if !roster::validate_transition(entry.status, target, &class, now)? {
            return Ok(entry);
        }

        let checked_in_at = (target == RosterStatus::Attended).then_some(now);
        let updated = roster_entries::update_status(&self.db, class_id, member_id, target, checked_in_at)
            .ok_or(ServiceError::RosterEntryNotFound)?;
        tracing::info!(
            class_id = %class_id,
            member_id = %member_id,
            status = %target,
            "roster status changed"
        );
        Ok(updated)
    }

    /// Roster-side effect of a class check-in: the member's entry moves to
    /// `Attended`, created or re-admitted on the spot if the class has room.
    /// Runs under the class lock; called by the attendance gate which holds
    /// the member lock.
    pub fn mark_attended_for_check_in(
        &self,
        class_id: Uuid,
        member_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<RosterEntryRow, ServiceError> {
        let lock = self.db.class_lock(class_id);
        let _guard = lock.lock();

        let class = self.active_class(class_id)?;
        let entries = roster_entries::list_by_class(&self.db, class_id);
        let existing = entries.iter().find(|e| e.member_id == member_id);

        match existing {
            Some(entry) if capacity::holds_seat(entry.status) => {
                if !roster::validate_transition(entry.status, RosterStatus::Attended, &class, now)? {
                    return Ok(entry.clone());
                }
                roster_entries::update_status(
                    &self.db,
                    class_id,
                    member_id,
                    RosterStatus::Attended,
                    Some(now),
                )
                .ok_or(ServiceError::RosterEntryNotFound)
            }
            Some(_) => {
                // Walk-in after a cancellation: re-admit if a seat is free.
                if !capacity::can_admit(&class, capacity::confirmed_count(&entries)) {
                    return Err(ServiceError::ClassFull);
                }
                roster_entries::rebook(
                    &self.db,
                    class_id,
                    member_id,
                    RosterStatus::Attended,
                    Some(now),
                )
                .ok_or(ServiceError::RosterEntryNotFound)
            }
            None => {
                // Walk-in with no prior booking.
                if !capacity::can_admit(&class, capacity::confirmed_count(&entries)) {
                    return Err(ServiceError::ClassFull);
                }
                Ok(roster_entries::create(
                    &self.db,
                    CreateRosterEntry {
                        class_occurrence_id: class_id,
                        member_id,
                        status: RosterStatus::Attended,
                        checked_in_at: Some(now),
                    },
                ))
            }
        }
    }

    /// Active occurrences within `[from, to)`, each with live occupancy and
    /// the instructor's display name when the directory resolves it.
    pub fn list_occurrences(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<OccurrenceSummary> {
        class_occurrences::list_in_window(&self.db, from, to)
            .into_iter()
            .map(|occurrence| {
                let entries = roster_entries::list_by_class(&self.db, occurrence.id);
                let confirmed = capacity::confirmed_count(&entries);
                let occupancy_pct = capacity::occupancy(&occurrence, confirmed);
                let instructor_name = instructors::get_by_id(&self.db, occurrence.instructor_id)
                    .map(|i| i.display_name);
                OccurrenceSummary {
                    occurrence,
                    instructor_name,
                    confirmed_count: confirmed,
                    occupancy_pct,
                }
            })
            .collect()
    }

    /// Roster of one class (soft-deleted classes included, for reporting),
    /// joined with member display fields.
    pub fn class_roster(&self, class_id: Uuid) -> Result<Vec<RosterMemberView>, ServiceError> {
        class_occurrences::get_by_id(&self.db, class_id).ok_or(ServiceError::ClassNotFound)?;
        let views = roster_entries::list_by_class(&self.db, class_id)
            .into_iter()
            .map(|entry| {
                let member = members::get_by_id(&self.db, entry.member_id);
                RosterMemberView {
                    member_name: member.as_ref().map(|m| m.display_name()),
                    member_email: member.map(|m| m.email),
                    entry,
                }
            })
            .collect();
        Ok(views)
    }

    /// Commands that hand out seats only apply to visible classes.
    fn active_class(&self, class_id: Uuid) -> Result<ClassOccurrenceRow, ServiceError> {
        class_occurrences::get_by_id(&self.db, class_id)
            .filter(|c| c.is_active)
            .ok_or(ServiceError::ClassNotFound)
    }
}

fn validate_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), ServiceError> {
    if start >= end {
        return Err(ServiceError::InvalidTimeWindow);
    }
    Ok(())
}
