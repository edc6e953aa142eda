//! Durable [`LogStore`] backed by the `job_logs` table.
//!
//! Filtering, ordering and pagination are pushed into SQL. A page's count
//! and its rows are read inside one transaction, so the reported total
//! always matches the snapshot the rows came from.

use std::collections::BTreeMap;

use async_trait::async_trait;
use jobwatch_core::error::CoreError;
use jobwatch_core::page::PageResult;
use jobwatch_core::query::QueryParams;
use jobwatch_core::record::ExecutionRecord;
use jobwatch_core::store::LogStore;

use crate::repositories::JobLogRepo;
use crate::schema::ensure_schema;
use crate::DbPool;

/// Relational [`LogStore`]. Cloning shares the underlying pool.
#[derive(Debug, Clone)]
pub struct RelationalLogStore {
    pool: DbPool,
}

impl RelationalLogStore {
    /// Wrap `pool`, creating the log table first if needed.
    pub async fn connect(pool: DbPool) -> Result<Self, sqlx::Error> {
        ensure_schema(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn page(
        &self,
        job_name: Option<&str>,
        params: &QueryParams,
    ) -> Result<PageResult<ExecutionRecord>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let total = JobLogRepo::count(&mut *tx, job_name, params.filter()).await?;
        let total = u64::try_from(total).unwrap_or_default();

        // Skip the fetch when the page starts past the last row.
        let rows = if params.offset() < total {
            JobLogRepo::fetch_page(&mut *tx, job_name, params).await?
        } else {
            Vec::new()
        };

        tx.commit().await?;

        let content = rows.into_iter().map(ExecutionRecord::from).collect();
        Ok(PageResult::new(content, total, params))
    }
}

#[async_trait]
impl LogStore for RelationalLogStore {
    async fn append(&self, job_name: &str, record: ExecutionRecord) -> Result<(), CoreError> {
        let id = JobLogRepo::insert(&self.pool, job_name, &record)
            .await
            .map_err(CoreError::storage)?;
        tracing::trace!(job_name, id, "Inserted execution record");
        Ok(())
    }

    async fn query_by_job(
        &self,
        job_name: &str,
        params: &QueryParams,
    ) -> Result<PageResult<ExecutionRecord>, CoreError> {
        let page = self
            .page(Some(job_name), params)
            .await
            .map_err(CoreError::storage)?;
        tracing::debug!(
            job_name,
            total = page.total_elements,
            page = page.page_number,
            "Queried job logs from database"
        );
        Ok(page)
    }

    async fn query_all(
        &self,
        params: &QueryParams,
    ) -> Result<PageResult<ExecutionRecord>, CoreError> {
        let page = self.page(None, params).await.map_err(CoreError::storage)?;
        tracing::debug!(
            total = page.total_elements,
            page = page.page_number,
            "Queried all logs from database"
        );
        Ok(page)
    }

    async fn all_by_job(&self) -> Result<BTreeMap<String, Vec<ExecutionRecord>>, CoreError> {
        let rows = JobLogRepo::list_all(&self.pool)
            .await
            .map_err(CoreError::storage)?;

        let mut groups: BTreeMap<String, Vec<ExecutionRecord>> = BTreeMap::new();
        for row in rows {
            groups
                .entry(row.job_name.clone())
                .or_default()
                .push(row.into());
        }
        Ok(groups)
    }
}
