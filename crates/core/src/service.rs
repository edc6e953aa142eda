//! Query façade over an injected [`LogStore`].
//!
//! Flat queries go straight to the backend, which pushes filters down
//! however it can. The job-grouped view is composed here from the
//! unpaginated per-job mapping, so its filter and group ordering rules are
//! the same whichever backend is configured.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::error::CoreError;
use crate::page::PageResult;
use crate::query::{QueryParams, SortField};
use crate::record::ExecutionRecord;
use crate::store::LogStore;
use crate::types::Timestamp;

/// A job and its matching records, the unit of the grouped view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobGroup {
    pub job_name: String,
    /// Latest `start_time` among `records`.
    pub last_started_at: Timestamp,
    pub records: Vec<ExecutionRecord>,
}

/// Entry point for recording and reading job executions.
#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn LogStore>,
}

impl QueryService {
    pub fn new(store: Arc<dyn LogStore>) -> Self {
        Self { store }
    }

    pub async fn record(&self, job_name: &str, record: ExecutionRecord) -> Result<(), CoreError> {
        self.store.append(job_name, record).await
    }

    /// One page of a job's records.
    pub async fn job_logs(
        &self,
        job_name: &str,
        params: &QueryParams,
    ) -> Result<PageResult<ExecutionRecord>, CoreError> {
        self.store.query_by_job(job_name, params).await
    }

    /// One page over all records, flat.
    pub async fn all_logs(
        &self,
        params: &QueryParams,
    ) -> Result<PageResult<ExecutionRecord>, CoreError> {
        self.store.query_all(params).await
    }

    /// Legacy read: a job's most recent records, capped.
    pub async fn recent_for_job(&self, job_name: &str) -> Result<Vec<ExecutionRecord>, CoreError> {
        self.store.recent_for_job(job_name).await
    }

    /// Legacy read: every record grouped by job.
    pub async fn all_by_job(&self) -> Result<BTreeMap<String, Vec<ExecutionRecord>>, CoreError> {
        self.store.all_by_job().await
    }

    /// One page of jobs, each with its records that pass `params.filter()`.
    ///
    /// Jobs with no matching records are dropped. Groups are ordered by
    /// their most recent start time (by name when sorting by
    /// [`SortField::JobName`]) in the requested direction, ties by name.
    /// Records inside a group follow the request's record ordering.
    pub async fn job_groups(&self, params: &QueryParams) -> Result<PageResult<JobGroup>, CoreError> {
        let filter = params.filter();
        let compare_records = params.sort_comparator();

        let mut groups: Vec<JobGroup> = self
            .store
            .all_by_job()
            .await?
            .into_iter()
            .filter_map(|(job_name, records)| {
                let mut records: Vec<ExecutionRecord> =
                    records.into_iter().filter(|r| filter.matches(r)).collect();
                let last_started_at = records.iter().map(|r| r.start_time).max()?;
                records.sort_by(|a, b| compare_records(a, b));
                Some(JobGroup {
                    job_name,
                    last_started_at,
                    records,
                })
            })
            .collect();

        let direction = params.direction();
        let by_name = params.sort_field() == SortField::JobName;
        groups.sort_by(|a, b| {
            let ordering = if by_name {
                a.job_name.cmp(&b.job_name)
            } else {
                a.last_started_at.cmp(&b.last_started_at)
            };
            direction
                .apply(ordering)
                .then_with(|| a.job_name.cmp(&b.job_name))
        });

        tracing::debug!(groups = groups.len(), "Built job groups");
        Ok(PageResult::paginate(groups, params))
    }
}
