use std::sync::Arc;

use jobwatch_core::service::QueryService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the service holds its store behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Query façade over the configured log store.
    pub service: QueryService,
    /// Database pool when the relational store is active, for health checks.
    pub pool: Option<jobwatch_db::DbPool>,
    pub config: Arc<ServerConfig>,
}
