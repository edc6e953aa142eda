//! Handlers for the execution log endpoints under `/job-monitor`.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::query::LogQueryParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Paginated views
// ---------------------------------------------------------------------------

/// GET /job-monitor
///
/// One page of jobs, each with its records that pass the filter.
pub async fn job_groups(
    State(state): State<AppState>,
    Query(query): Query<LogQueryParams>,
) -> AppResult<impl IntoResponse> {
    let params = query.into_params()?;
    let page = state.service.job_groups(&params).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /job-monitor/paged
///
/// One flat page of records across all jobs.
pub async fn all_logs(
    State(state): State<AppState>,
    Query(query): Query<LogQueryParams>,
) -> AppResult<impl IntoResponse> {
    let params = query.into_params()?;
    let page = state.service.all_logs(&params).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /job-monitor/{job_name}
pub async fn job_logs(
    State(state): State<AppState>,
    Path(job_name): Path<String>,
    Query(query): Query<LogQueryParams>,
) -> AppResult<impl IntoResponse> {
    let params = query.into_params()?;
    let page = state.service.job_logs(&job_name, &params).await?;
    Ok(Json(DataResponse { data: page }))
}

// ---------------------------------------------------------------------------
// Legacy unpaginated views
// ---------------------------------------------------------------------------

/// GET /job-monitor/all
pub async fn all_by_job(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let groups = state.service.all_by_job().await?;
    Ok(Json(DataResponse { data: groups }))
}

/// GET /job-monitor/{job_name}/all
///
/// The job's most recent records, capped.
pub async fn recent_for_job(
    State(state): State<AppState>,
    Path(job_name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let records = state.service.recent_for_job(&job_name).await?;
    Ok(Json(DataResponse { data: records }))
}
