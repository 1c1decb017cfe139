//! Health check handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::state::AppState;

/// Health response body.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// Liveness health check endpoint.
///
/// Returns `{"status":"ok"}` if the server is running. Does not check dependencies.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => (StatusCode::OK, Json(HealthStatus { status: "ok" })),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus {
                    status: "unavailable",
                }),
            )
        }
    }
}
