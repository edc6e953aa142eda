//! Log store selection at startup.

use std::sync::Arc;

use anyhow::Context;
use jobwatch_core::memory::MemoryLogStore;
use jobwatch_core::store::LogStore;
use jobwatch_db::{DbPool, RelationalLogStore};

use crate::config::ServerConfig;

/// The log store chosen for this process.
pub struct Backend {
    pub store: Arc<dyn LogStore>,
    /// Present only for the relational store.
    pub pool: Option<DbPool>,
}

impl Backend {
    pub fn label(&self) -> &'static str {
        if self.pool.is_some() {
            "relational"
        } else {
            "memory"
        }
    }
}

/// Open the relational store when `DATABASE_URL` is set, else the memory one.
///
/// A configured database that cannot be reached is an error; there is no
/// fallback to memory.
pub async fn open_backend(config: &ServerConfig) -> anyhow::Result<Backend> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::info!("DATABASE_URL not set, keeping execution logs in memory");
        return Ok(Backend {
            store: Arc::new(MemoryLogStore::new()),
            pool: None,
        });
    };

    let pool = jobwatch_db::create_pool(database_url, config.db_max_connections)
        .await
        .context("Failed to connect to database")?;
    tracing::info!(max_connections = config.db_max_connections, "Database connection pool created");

    jobwatch_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    tracing::info!("Database health check passed");

    let store = RelationalLogStore::connect(pool.clone())
        .await
        .context("Failed to provision job_logs table")?;

    Ok(Backend {
        store: Arc::new(store),
        pool: Some(pool),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(database_url: Option<&str>) -> ServerConfig {
        let mut config = ServerConfig::from_lookup(|_| None).unwrap();
        config.database_url = database_url.map(str::to_string);
        config
    }

    #[tokio::test]
    async fn no_url_selects_memory() {
        let backend = open_backend(&config(None)).await.unwrap();
        assert_eq!(backend.label(), "memory");
    }

    #[tokio::test]
    async fn url_selects_relational() {
        let backend = open_backend(&config(Some("sqlite::memory:"))).await.unwrap();
        assert_eq!(backend.label(), "relational");
    }

    #[tokio::test]
    async fn unreachable_database_is_an_error() {
        let result = open_backend(&config(Some("sqlite:///nonexistent-dir/sub/jobwatch.db"))).await;
        assert!(result.is_err());
    }
}
