use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::ServiceError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("bad request: {0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            AppError::Service(e) => (status_for(e), e.kind()),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        };
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
                kind,
            }),
        )
            .into_response()
    }
}

/// Expected, recoverable business outcomes map to client-side statuses;
/// nothing from the engine surfaces as a 500.
fn status_for(e: &ServiceError) -> StatusCode {
    match e {
        ServiceError::InvalidTimeWindow | ServiceError::InvalidCapacity => StatusCode::BAD_REQUEST,
        ServiceError::CapacityBelowRoster { .. }
        | ServiceError::ClassFull
        | ServiceError::AlreadyBooked
        | ServiceError::InvalidTransition { .. }
        | ServiceError::SessionAlreadyOpen { .. }
        | ServiceError::SessionAlreadyClosed => StatusCode::CONFLICT,
        ServiceError::NoActiveMembership => StatusCode::FORBIDDEN,
        ServiceError::ClassNotFound
        | ServiceError::MemberNotFound
        | ServiceError::RosterEntryNotFound
        | ServiceError::SessionNotFound => StatusCode::NOT_FOUND,
    }
}
