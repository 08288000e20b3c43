use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use infra::models::SessionType;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CheckInRequest {
    pub member_id: Uuid,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    #[serde(default)]
    pub class_id: Option<Uuid>,
}

pub async fn check_in(
    State(state): State<AppState>,
    Json(req): Json<CheckInRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state
        .attendance
        .check_in(req.member_id, req.session_type, req.class_id)?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn check_out(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.attendance.check_out(session_id)?;
    Ok(Json(session))
}

pub async fn member_sessions(
    State(state): State<AppState>,
    Path(member_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let sessions = state.attendance.member_sessions(member_id)?;
    Ok(Json(sessions))
}
