//! Record the outcome of a job run as it happens.

use std::fmt::Display;
use std::future::Future;

use chrono::Utc;

use crate::record::ExecutionRecord;
use crate::service::QueryService;

/// Run `job`, then append its timing and outcome under `job_name`.
///
/// The job's own result is returned untouched. A failure to store the
/// record is logged and otherwise ignored.
pub async fn monitored<F, T, E>(service: &QueryService, job_name: &str, job: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    let start_time = Utc::now();
    let outcome = job.await;
    let end_time = Utc::now();

    let record = match &outcome {
        Ok(_) => ExecutionRecord::succeeded(job_name, start_time, end_time),
        Err(err) => ExecutionRecord::failed(job_name, start_time, end_time, err.to_string()),
    };
    let success = record.success;

    match service.record(job_name, record).await {
        Ok(()) => tracing::debug!(job_name, success, "Recorded job execution"),
        Err(err) => tracing::warn!(job_name, error = %err, "Failed to record job execution"),
    }

    outcome
}
