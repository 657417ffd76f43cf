//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
///
/// Reports 503 when the database does not answer.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, database) = match &state.db {
        None => (StatusCode::OK, "in-memory"),
        Some(db) => match db.health_check().await {
            Ok(true) => (StatusCode::OK, "connected"),
            Ok(false) => (StatusCode::SERVICE_UNAVAILABLE, "unreachable"),
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                (StatusCode::SERVICE_UNAVAILABLE, "unreachable")
            }
        },
    };

    let body = HealthResponse {
        status: if status.is_success() { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    };
    (status, Json(body))
}
