//! Route definitions for the `/job-monitor` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::job_monitor;
use crate::state::AppState;

/// Routes mounted at `/job-monitor`.
///
/// ```text
/// GET    /                    -> job_groups
/// GET    /paged               -> all_logs
/// GET    /all                 -> all_by_job
/// GET    /{job_name}          -> job_logs
/// GET    /{job_name}/all      -> recent_for_job
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(job_monitor::job_groups))
        .route("/paged", get(job_monitor::all_logs))
        .route("/all", get(job_monitor::all_by_job))
        .route("/{job_name}", get(job_monitor::job_logs))
        .route("/{job_name}/all", get(job_monitor::recent_for_job))
}
