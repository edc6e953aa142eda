pub mod health;
pub mod job_monitor;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// ```text
/// /health                          service and store health
/// /job-monitor/...                 execution logs (see job_monitor::router)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/job-monitor", job_monitor::router())
}
