//! Shared fixtures for database integration tests.

#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use jobwatch_core::record::ExecutionRecord;
use jobwatch_core::types::Timestamp;
use jobwatch_db::{DbPool, RelationalLogStore};

/// Fresh private in-memory database with the log table provisioned.
pub async fn memory_store() -> RelationalLogStore {
    let pool = memory_pool().await;
    RelationalLogStore::connect(pool)
        .await
        .expect("Failed to provision job_logs")
}

pub async fn memory_pool() -> DbPool {
    jobwatch_db::create_pool("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database")
}

pub fn base_time() -> Timestamp {
    Utc.with_ymd_and_hms(2025, 7, 18, 0, 0, 0).unwrap()
}

/// A run of `job` starting `minute` minutes after [`base_time`].
pub fn run(job: &str, minute: i64, duration_ms: i64, success: bool) -> ExecutionRecord {
    let start = base_time() + Duration::minutes(minute);
    let end = start + Duration::milliseconds(duration_ms);
    if success {
        ExecutionRecord::succeeded(job, start, end)
    } else {
        ExecutionRecord::failed(job, start, end, "Network connection failed")
    }
}
