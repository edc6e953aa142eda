//! Synthetic execution history for demos.

use chrono::{Duration, Utc};
use jobwatch_core::error::CoreError;
use jobwatch_core::record::ExecutionRecord;
use jobwatch_core::service::QueryService;
use rand::Rng;

/// Sample job: name, number of runs, probability a run succeeds.
const DEMO_JOBS: [(&str, u32, f64); 5] = [
    ("DataProcessingJob", 25, 0.85),
    ("EmailSenderJob", 40, 0.95),
    ("ReportGeneratorJob", 18, 0.75),
    ("DatabaseBackupJob", 12, 0.90),
    ("FileCleanupJob", 30, 0.98),
];

const DEMO_ERRORS: [&str; 7] = [
    "Database connection timeout",
    "File not found: /tmp/data.csv",
    "Memory limit exceeded",
    "Network connection failed",
    "Permission denied accessing resource",
    "Invalid data format in input file",
    "Service temporarily unavailable",
];

/// Append a week of runs for each sample job. Returns the number appended.
pub async fn seed_demo_data(service: &QueryService) -> Result<usize, CoreError> {
    let records = demo_records();
    let count = records.len();
    for record in records {
        let job_name = record.job_name.clone();
        service.record(&job_name, record).await?;
    }
    tracing::info!(count, jobs = DEMO_JOBS.len(), "Seeded demo execution data");
    Ok(count)
}

/// Runs spaced six hours apart starting a week ago, with a few minutes of
/// jitter and 30 to 150 second durations.
pub fn demo_records() -> Vec<ExecutionRecord> {
    let mut rng = rand::rng();
    let base = Utc::now() - Duration::days(7);
    let mut records = Vec::new();

    for (job_name, runs, success_rate) in DEMO_JOBS {
        for run in 0..runs {
            let start = base
                + Duration::hours(i64::from(run) * 6)
                + Duration::minutes(rng.random_range(0..60));
            let end = start + Duration::seconds(rng.random_range(30..=150));

            let record = if rng.random_bool(success_rate) {
                ExecutionRecord::succeeded(job_name, start, end)
            } else {
                let message = DEMO_ERRORS[rng.random_range(0..DEMO_ERRORS.len())];
                ExecutionRecord::failed(job_name, start, end, message)
            };
            records.push(record);
        }
    }
    records
}
