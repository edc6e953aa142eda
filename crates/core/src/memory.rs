//! Process-resident log store.
//!
//! Records live in a sharded concurrent map keyed by job name, so writers
//! to different jobs rarely contend and never wait on a global lock. Each
//! entry carries a store-wide sequence number used as the tie-break for
//! equal sort keys, matching the relational backend's `id` ordering.

use std::collections::BTreeMap;
use std::sync::atomic::{self, AtomicU64};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::CoreError;
use crate::page::PageResult;
use crate::query::{QueryParams, SortDirection, SortField};
use crate::record::ExecutionRecord;
use crate::store::LogStore;

#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    record: ExecutionRecord,
}

/// In-memory [`LogStore`]. Construct once and share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct MemoryLogStore {
    jobs: DashMap<String, Vec<Entry>>,
    next_seq: AtomicU64,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored records across all jobs.
    pub fn len(&self) -> usize {
        self.jobs.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point-in-time copy of one job's entries.
    fn snapshot_job(&self, job_name: &str) -> Vec<Entry> {
        self.jobs
            .get(job_name)
            .map(|entries| entries.value().clone())
            .unwrap_or_default()
    }

    /// Copy of every job's entries. Each job is copied under its own shard
    /// lock; appends to other jobs may land while the copy is in progress.
    fn snapshot_all(&self) -> Vec<Entry> {
        self.jobs
            .iter()
            .flat_map(|entries| entries.value().clone())
            .collect()
    }
}

/// Filter, sort and paginate a snapshot.
fn select(mut entries: Vec<Entry>, params: &QueryParams) -> PageResult<ExecutionRecord> {
    let filter = params.filter();
    entries.retain(|entry| filter.matches(&entry.record));

    let compare = params.sort_comparator();
    entries.sort_by(|a, b| compare(&a.record, &b.record).then(a.seq.cmp(&b.seq)));

    let records = entries.into_iter().map(|entry| entry.record).collect();
    PageResult::paginate(records, params)
}

/// Order a job's entries most recent first, insertion order on ties.
fn newest_first(mut entries: Vec<Entry>) -> Vec<ExecutionRecord> {
    entries.sort_by(|a, b| {
        SortDirection::Desc
            .apply(SortField::StartTime.compare(&a.record, &b.record))
            .then(a.seq.cmp(&b.seq))
    });
    entries.into_iter().map(|entry| entry.record).collect()
}

#[async_trait]
impl LogStore for MemoryLogStore {
    async fn append(&self, job_name: &str, mut record: ExecutionRecord) -> Result<(), CoreError> {
        // The key is authoritative, as it is for the `job_name` column.
        record.job_name = job_name.to_owned();
        let mut entries = self.jobs.entry(job_name.to_owned()).or_default();
        // Taken while the shard is locked so a job's sequence numbers follow
        // its insertion order.
        let seq = self.next_seq.fetch_add(1, atomic::Ordering::Relaxed);
        entries.push(Entry { seq, record });
        tracing::trace!(job_name, seq, "Appended execution record");
        Ok(())
    }

    async fn query_by_job(
        &self,
        job_name: &str,
        params: &QueryParams,
    ) -> Result<PageResult<ExecutionRecord>, CoreError> {
        let page = select(self.snapshot_job(job_name), params);
        tracing::debug!(
            job_name,
            total = page.total_elements,
            page = page.page_number,
            "Queried job logs from memory"
        );
        Ok(page)
    }

    async fn query_all(
        &self,
        params: &QueryParams,
    ) -> Result<PageResult<ExecutionRecord>, CoreError> {
        let page = select(self.snapshot_all(), params);
        tracing::debug!(
            total = page.total_elements,
            page = page.page_number,
            "Queried all logs from memory"
        );
        Ok(page)
    }

    async fn all_by_job(&self) -> Result<BTreeMap<String, Vec<ExecutionRecord>>, CoreError> {
        let groups = self
            .jobs
            .iter()
            .map(|entries| (entries.key().clone(), entries.value().clone()))
            .collect::<Vec<_>>();

        Ok(groups
            .into_iter()
            .map(|(job_name, entries)| (job_name, newest_first(entries)))
            .collect())
    }
}
