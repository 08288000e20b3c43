use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::str::FromStr;
use uuid::Uuid;

use infra::models::{ClassOccurrenceRow, RosterStatus};

use crate::error::AppError;
use crate::services::scheduling_service::{
    CreateClassParams, OccurrenceSummary, RecurrenceParams, RosterMemberView, UpdateClassParams,
};
use crate::services::recurrence;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    pub category: String,
    pub instructor_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_capacity: i32,
    #[serde(default)]
    pub recurring: Option<RecurringRequest>,
}

/// Weekly repetition input. Day tokens go through the tolerant descriptor
/// parser, so junk tokens degrade instead of failing the request.
#[derive(Deserialize)]
pub struct RecurringRequest {
    #[serde(default)]
    pub days_of_week: Vec<String>,
    pub count: NonZeroU32,
}

#[derive(Deserialize)]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub instructor_id: Option<Uuid>,
    pub max_capacity: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct RescheduleRequest {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct WindowQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct AddRosterMemberRequest {
    pub member_id: Uuid,
}

#[derive(Deserialize)]
pub struct UpdateRosterStatusRequest {
    pub status: String,
}

#[derive(Serialize)]
pub struct OccurrenceResponse {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub instructor_id: Uuid,
    pub instructor_name: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_capacity: i32,
    pub recurrence: Option<String>,
    pub is_active: bool,
    pub confirmed_count: i32,
    pub occupancy_pct: u8,
}

impl From<OccurrenceSummary> for OccurrenceResponse {
    fn from(summary: OccurrenceSummary) -> Self {
        let o = summary.occurrence;
        Self {
            id: o.id,
            name: o.name,
            category: o.category,
            instructor_id: o.instructor_id,
            instructor_name: summary.instructor_name,
            start_time: o.start_time,
            end_time: o.end_time,
            max_capacity: o.max_capacity,
            recurrence: o.recurrence,
            is_active: o.is_active,
            confirmed_count: summary.confirmed_count,
            occupancy_pct: summary.occupancy_pct,
        }
    }
}

#[derive(Serialize)]
pub struct RosterMemberResponse {
    pub class_occurrence_id: Uuid,
    pub member_id: Uuid,
    pub member_name: Option<String>,
    pub member_email: Option<String>,
    pub status: RosterStatus,
    pub booked_at: DateTime<Utc>,
    pub checked_in_at: Option<DateTime<Utc>>,
}

impl From<RosterMemberView> for RosterMemberResponse {
    fn from(view: RosterMemberView) -> Self {
        Self {
            class_occurrence_id: view.entry.class_occurrence_id,
            member_id: view.entry.member_id,
            member_name: view.member_name,
            member_email: view.member_email,
            status: view.entry.status,
            booked_at: view.entry.booked_at,
            checked_in_at: view.entry.checked_in_at,
        }
    }
}

pub async fn create_class(
    State(state): State<AppState>,
    Json(req): Json<CreateClassRequest>,
) -> Result<impl IntoResponse, AppError> {
    let recurring = req.recurring.map(|r| RecurrenceParams {
        days_of_week: recurrence::parse_days(&r.days_of_week.join(",")),
        count: r.count,
    });
    let rows: Vec<ClassOccurrenceRow> = state.scheduling.create_class(CreateClassParams {
        name: req.name,
        category: req.category,
        instructor_id: req.instructor_id,
        start_time: req.start_time,
        end_time: req.end_time,
        max_capacity: req.max_capacity,
        recurring,
    })?;
    Ok((StatusCode::CREATED, Json(rows)))
}

pub async fn list_classes(
    State(state): State<AppState>,
    Query(window): Query<WindowQuery>,
) -> Result<impl IntoResponse, AppError> {
    let summaries: Vec<OccurrenceResponse> = state
        .scheduling
        .list_occurrences(window.from, window.to)
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(summaries))
}

pub async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateClassRequest>,
) -> Result<impl IntoResponse, AppError> {
    let row = state.scheduling.update_class(
        id,
        UpdateClassParams {
            name: req.name,
            category: req.category,
            instructor_id: req.instructor_id,
            max_capacity: req.max_capacity,
            is_active: req.is_active,
        },
    )?;
    Ok(Json(row))
}

pub async fn reschedule_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RescheduleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let row = state
        .scheduling
        .reschedule_class(id, req.start_time, req.end_time)?;
    Ok(Json(row))
}

pub async fn delete_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let row = state.scheduling.delete_class(id)?;
    Ok(Json(row))
}

pub async fn get_roster(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let roster: Vec<RosterMemberResponse> = state
        .scheduling
        .class_roster(id)?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(roster))
}

pub async fn add_to_roster(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddRosterMemberRequest>,
) -> Result<impl IntoResponse, AppError> {
    let entry = state.scheduling.add_member_to_roster(id, req.member_id)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_roster_status(
    State(state): State<AppState>,
    Path((id, member_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateRosterStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let status = RosterStatus::from_str(&req.status).map_err(AppError::BadRequest)?;
    let entry = state
        .scheduling
        .update_roster_status(id, member_id, status)?;
    Ok(Json(entry))
}
