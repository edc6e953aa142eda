//! Execution record: the outcome of one completed job run.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// One job run's outcome. Records are appended once and never mutated.
///
/// The core does not validate record content: `error_message` on a
/// successful run, or `end_time` before `start_time`, are stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub job_name: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub duration_ms: i64,
    pub success: bool,
    pub error_message: Option<String>,
}

impl ExecutionRecord {
    /// A successful run between `start_time` and `end_time`.
    pub fn succeeded(job_name: impl Into<String>, start_time: Timestamp, end_time: Timestamp) -> Self {
        Self {
            job_name: job_name.into(),
            start_time,
            end_time,
            duration_ms: elapsed_ms(start_time, end_time),
            success: true,
            error_message: None,
        }
    }

    /// A failed run carrying the error message reported by the job.
    pub fn failed(
        job_name: impl Into<String>,
        start_time: Timestamp,
        end_time: Timestamp,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            job_name: job_name.into(),
            start_time,
            end_time,
            duration_ms: elapsed_ms(start_time, end_time),
            success: false,
            error_message: Some(error_message.into()),
        }
    }
}

/// Milliseconds between two instants, floored at zero.
fn elapsed_ms(start: Timestamp, end: Timestamp) -> i64 {
    (end - start).num_milliseconds().max(0)
}
