//! Provisioning of the `job_logs` table.

use crate::DbPool;

/// Table holding one row per appended execution record.
pub const JOB_LOGS_TABLE: &str = "job_logs";

const CREATE_JOB_LOGS: &str = "\
    CREATE TABLE IF NOT EXISTS job_logs ( \
        id            INTEGER PRIMARY KEY AUTOINCREMENT, \
        job_name      TEXT    NOT NULL, \
        start_time    TEXT    NOT NULL, \
        end_time      TEXT    NOT NULL, \
        duration_ms   INTEGER NOT NULL, \
        success       BOOLEAN NOT NULL, \
        error_message TEXT \
    )";

/// Create `job_logs` if it does not exist yet. Safe to call on every start.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    let exists: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
    )
    .bind(JOB_LOGS_TABLE)
    .fetch_one(pool)
    .await?;

    if exists > 0 {
        tracing::debug!(table = JOB_LOGS_TABLE, "Log table already present");
        return Ok(());
    }

    sqlx::query(CREATE_JOB_LOGS).execute(pool).await?;
    tracing::info!(table = JOB_LOGS_TABLE, "Created log table");
    Ok(())
}
