use std::time::Duration;

use axum::{
    http::{
        header::{HeaderValue, CONTENT_TYPE},
        Method, StatusCode,
    },
    routing::{get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::routes::{attendance, classes};
use crate::state::AppState;

/// Build the Axum router: class scheduling commands/queries, roster
/// management, and the attendance check-in/check-out surface.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Simple liveness check.
        .route("/health", get(health))
        // Class lifecycle + window listing
        .route(
            "/classes",
            post(classes::create_class).get(classes::list_classes),
        )
        .route(
            "/classes/{id}",
            patch(classes::update_class).delete(classes::delete_class),
        )
        .route("/classes/{id}/reschedule", post(classes::reschedule_class))
        // Roster
        .route(
            "/classes/{id}/roster",
            get(classes::get_roster).post(classes::add_to_roster),
        )
        .route(
            "/classes/{id}/roster/{member_id}",
            patch(classes::update_roster_status),
        )
        // Attendance sessions
        .route("/attendance/check-in", post(attendance::check_in))
        .route(
            "/attendance/{session_id}/check-out",
            post(attendance::check_out),
        )
        .route(
            "/members/{member_id}/sessions",
            get(attendance::member_sessions),
        )
        .with_state(state)
        // Useful default middlewares
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer({
            let allowed_origins = std::env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://localhost:3001".to_string());

            let origins: Vec<HeaderValue> = allowed_origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([CONTENT_TYPE])
        })
}

async fn health() -> &'static str {
    "ok"
}
