use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Which log store is active: `memory` or `relational`.
    pub store: &'static str,
    /// Whether the log store is reachable. Always true for memory.
    pub store_healthy: bool,
}

/// GET /health -- returns service and log store health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (store, store_healthy) = match &state.pool {
        Some(pool) => ("relational", jobwatch_db::health_check(pool).await.is_ok()),
        None => ("memory", true),
    };

    let status = if store_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        store,
        store_healthy,
    })
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
