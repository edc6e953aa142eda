//! Storage capability shared by the in-memory and relational backends.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::page::PageResult;
use crate::query::QueryParams;
use crate::record::ExecutionRecord;

/// Cap on the legacy unpaginated per-job read, applied by every backend.
pub const RECENT_LIMIT: i64 = 50;

/// Append-only store of execution records, keyed by job name.
///
/// Implementations must give identical results for the same records and
/// [`QueryParams`]: filter, then sort (ties in insertion order), then slice
/// the page. Unknown job names produce empty results, not errors.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Store `record` under `job_name`. Every call adds a new entry, and the
    /// stored record carries `job_name` whatever its own field said.
    async fn append(&self, job_name: &str, record: ExecutionRecord) -> Result<(), CoreError>;

    /// One page of a single job's records.
    async fn query_by_job(
        &self,
        job_name: &str,
        params: &QueryParams,
    ) -> Result<PageResult<ExecutionRecord>, CoreError>;

    /// One page over every job's records, flattened.
    async fn query_all(&self, params: &QueryParams)
        -> Result<PageResult<ExecutionRecord>, CoreError>;

    /// Every record grouped by job name, each group most recent first.
    async fn all_by_job(&self) -> Result<BTreeMap<String, Vec<ExecutionRecord>>, CoreError>;

    /// The [`RECENT_LIMIT`] most recent records of a job, newest first.
    async fn recent_for_job(&self, job_name: &str) -> Result<Vec<ExecutionRecord>, CoreError> {
        let params = QueryParams::new(0, RECENT_LIMIT)?;
        Ok(self.query_by_job(job_name, &params).await?.content)
    }
}
