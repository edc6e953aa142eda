//! Repository for the `job_logs` table.
//!
//! Page queries take a connection so the relational store can run a count
//! and its page fetch inside one transaction.

use jobwatch_core::query::{LogFilter, QueryParams, SortDirection, SortField};
use jobwatch_core::record::ExecutionRecord;
use jobwatch_core::types::Timestamp;
use sqlx::sqlite::{SqliteArguments, SqliteConnection};
use sqlx::Sqlite;

use crate::models::job_log::JobLogRow;
use crate::DbPool;

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

/// Column list for `job_logs` SELECT queries.
const COLUMNS: &str = "\
    id, job_name, start_time, end_time, duration_ms, success, error_message";

/// Column list for INSERT (excludes auto-generated `id`).
const INSERT_COLUMNS: &str = "\
    job_name, start_time, end_time, duration_ms, success, error_message";

// ---------------------------------------------------------------------------
// JobLogRepo
// ---------------------------------------------------------------------------

/// Provides insert and query operations for execution logs.
pub struct JobLogRepo;

impl JobLogRepo {
    /// Insert one row. Never upserts: identical records become two rows.
    pub async fn insert(
        pool: &DbPool,
        job_name: &str,
        record: &ExecutionRecord,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("INSERT INTO job_logs ({INSERT_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?)");
        let result = sqlx::query(&query)
            .bind(job_name)
            .bind(record.start_time)
            .bind(record.end_time)
            .bind(record.duration_ms)
            .bind(record.success)
            .bind(record.error_message.as_deref())
            .execute(pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Count rows matching the job scope and filter (for pagination metadata).
    pub async fn count(
        conn: &mut SqliteConnection,
        job_name: Option<&str>,
        filter: &LogFilter,
    ) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values) = build_log_filter(job_name, filter);
        let query = format!("SELECT COUNT(*) FROM job_logs {where_clause}");

        let q = bind_log_values_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values);
        q.fetch_one(conn).await
    }

    /// Fetch one page of rows matching the job scope and filter.
    ///
    /// Ordered by the requested column, then by `id` ascending so equal sort
    /// keys keep insertion order in either direction.
    pub async fn fetch_page(
        conn: &mut SqliteConnection,
        job_name: Option<&str>,
        params: &QueryParams,
    ) -> Result<Vec<JobLogRow>, sqlx::Error> {
        let (where_clause, bind_values) = build_log_filter(job_name, params.filter());
        let order_clause = order_by(params.sort_field(), params.direction());

        let query = format!(
            "SELECT {COLUMNS} FROM job_logs {where_clause} {order_clause} LIMIT ? OFFSET ?"
        );

        let offset = i64::try_from(params.offset()).unwrap_or(i64::MAX);
        let q = bind_log_values(sqlx::query_as::<_, JobLogRow>(&query), &bind_values);
        q.bind(i64::from(params.limit()))
            .bind(offset)
            .fetch_all(conn)
            .await
    }

    /// List every row, most recent first.
    pub async fn list_all(pool: &DbPool) -> Result<Vec<JobLogRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM job_logs {}",
            order_by(SortField::StartTime, SortDirection::Desc)
        );
        sqlx::query_as::<_, JobLogRow>(&query)
            .fetch_all(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built log queries.
enum BindValue {
    Text(String),
    Bool(bool),
    Timestamp(Timestamp),
}

/// ORDER BY clause from the closed sort enums. Only fixed identifiers are
/// interpolated.
fn order_by(field: SortField, direction: SortDirection) -> String {
    format!(
        "ORDER BY {} {}, id ASC",
        field.column(),
        direction.keyword()
    )
}

/// Build a WHERE clause and bind values from the job scope and filter.
///
/// The `where_clause` is empty if nothing is active, or starts with `WHERE `.
fn build_log_filter(job_name: Option<&str>, filter: &LogFilter) -> (String, Vec<BindValue>) {
    let mut conditions: Vec<&'static str> = Vec::new();
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(job_name) = job_name {
        conditions.push("job_name = ?");
        bind_values.push(BindValue::Text(job_name.to_string()));
    }

    if let Some(success) = filter.status {
        conditions.push("success = ?");
        bind_values.push(BindValue::Bool(success));
    }

    if let Some(from) = filter.start_date {
        conditions.push("start_time >= ?");
        bind_values.push(BindValue::Timestamp(from));
    }

    if let Some(to) = filter.end_date {
        conditions.push("end_time <= ?");
        bind_values.push(BindValue::Timestamp(to));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_log_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Bool(v) => q = q.bind(*v),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_log_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, Sqlite, i64, SqliteArguments<'q>>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, Sqlite, i64, SqliteArguments<'q>> {
    for val in bind_values {
        match val {
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Bool(v) => q = q.bind(*v),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}
