//! Row model for the `job_logs` table.

use jobwatch_core::record::ExecutionRecord;
use jobwatch_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A stored execution record. `id` reflects insertion order.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobLogRow {
    pub id: i64,
    pub job_name: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub duration_ms: i64,
    pub success: bool,
    pub error_message: Option<String>,
}

impl From<JobLogRow> for ExecutionRecord {
    fn from(row: JobLogRow) -> Self {
        ExecutionRecord {
            job_name: row.job_name,
            start_time: row.start_time,
            end_time: row.end_time,
            duration_ms: row.duration_ms,
            success: row.success,
            error_message: row.error_message,
        }
    }
}
