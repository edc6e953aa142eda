//! Shared helpers for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::{DateTime, Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use jobwatch_api::config::ServerConfig;
use jobwatch_api::router::build_app_router;
use jobwatch_api::state::AppState;
use jobwatch_core::memory::MemoryLogStore;
use jobwatch_core::record::ExecutionRecord;
use jobwatch_core::service::QueryService;
use jobwatch_core::store::LogStore;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults and the memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        db_max_connections: 1,
        seed_demo_data: false,
    }
}

/// Build the full application router over `store`, with the same middleware
/// stack production uses.
pub fn build_test_app(store: Arc<dyn LogStore>) -> Router {
    let state = AppState {
        service: QueryService::new(store),
        pool: None,
        config: Arc::new(test_config()),
    };
    build_app_router(state).unwrap()
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 18, 0, 0, 0).unwrap()
}

/// A run of `job` starting `hour` hours after [`base_time`], lasting a minute.
pub fn run(job: &str, hour: i64, success: bool) -> ExecutionRecord {
    let start = base_time() + Duration::hours(hour);
    let end = start + Duration::minutes(1);
    if success {
        ExecutionRecord::succeeded(job, start, end)
    } else {
        ExecutionRecord::failed(job, start, end, "Memory limit exceeded")
    }
}

/// Memory store holding three jobs:
/// - `DataProcessingJob` at hours 1, 5 (failed), 9
/// - `EmailSenderJob` at hours 2, 7
/// - `FileCleanupJob` at hour 3 (failed)
pub async fn seeded_store() -> Arc<dyn LogStore> {
    let store = Arc::new(MemoryLogStore::new());
    for (job, hour, success) in [
        ("DataProcessingJob", 1, true),
        ("EmailSenderJob", 2, true),
        ("FileCleanupJob", 3, false),
        ("DataProcessingJob", 5, false),
        ("EmailSenderJob", 7, true),
        ("DataProcessingJob", 9, true),
    ] {
        store.append(job, run(job, hour, success)).await.unwrap();
    }
    store
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
