//! Integration tests for the `/job-monitor` endpoints.

mod common;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{body_json, build_test_app, get, run, seeded_store};
use jobwatch_core::error::CoreError;
use jobwatch_core::memory::MemoryLogStore;
use jobwatch_core::page::PageResult;
use jobwatch_core::query::QueryParams;
use jobwatch_core::record::ExecutionRecord;
use jobwatch_core::store::{LogStore, RECENT_LIMIT};

fn names(items: &serde_json::Value, key: &str) -> Vec<String> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item[key].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Grouped view
// ---------------------------------------------------------------------------

#[tokio::test]
async fn groups_default_to_most_recent_job_first() {
    let app = build_test_app(seeded_store().await);

    let response = get(app, "/job-monitor").await;

    assert_eq!(response.status(), StatusCode::OK);
    let page = &body_json(response).await["data"];
    assert_eq!(
        names(&page["content"], "job_name"),
        vec!["DataProcessingJob", "EmailSenderJob", "FileCleanupJob"]
    );
    assert_eq!(page["total_elements"], 3);
    assert_eq!(page["page_size"], 20);
    assert_eq!(page["content"][0]["records"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn failed_filter_drops_jobs_without_failures() {
    let app = build_test_app(seeded_store().await);

    let response = get(app, "/job-monitor?status=failed").await;

    let page = &body_json(response).await["data"];
    assert_eq!(
        names(&page["content"], "job_name"),
        vec!["DataProcessingJob", "FileCleanupJob"]
    );
    assert_eq!(page["content"][0]["records"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Flat views
// ---------------------------------------------------------------------------

#[tokio::test]
async fn paged_view_spans_jobs() {
    let app = build_test_app(seeded_store().await);

    let response = get(app, "/job-monitor/paged?page=1&size=4").await;

    assert_eq!(response.status(), StatusCode::OK);
    let page = &body_json(response).await["data"];
    assert_eq!(page["total_elements"], 6);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["has_next"], false);
    assert_eq!(page["has_previous"], true);
    // Hours 2 and 1 are the oldest two.
    assert_eq!(
        names(&page["content"], "job_name"),
        vec!["EmailSenderJob", "DataProcessingJob"]
    );
}

#[tokio::test]
async fn job_view_sorts_and_filters() {
    let app = build_test_app(seeded_store().await);

    let response = get(
        app,
        "/job-monitor/DataProcessingJob?sort=start_time&direction=asc&start_date=2025-07-18T04:00:00Z",
    )
    .await;

    let page = &body_json(response).await["data"];
    assert_eq!(page["total_elements"], 2);
    let content = page["content"].as_array().unwrap();
    assert_eq!(content[0]["success"], false);
    assert_eq!(content[0]["error_message"], "Memory limit exceeded");
    assert_eq!(content[1]["success"], true);
}

#[tokio::test]
async fn unknown_job_is_an_empty_page() {
    let app = build_test_app(seeded_store().await);

    let response = get(app, "/job-monitor/NoSuchJob").await;

    assert_eq!(response.status(), StatusCode::OK);
    let page = &body_json(response).await["data"];
    assert_eq!(page["content"].as_array().unwrap().len(), 0);
    assert_eq!(page["total_pages"], 0);
}

// ---------------------------------------------------------------------------
// Legacy views
// ---------------------------------------------------------------------------

#[tokio::test]
async fn all_returns_mapping_by_job() {
    let app = build_test_app(seeded_store().await);

    let response = get(app, "/job-monitor/all").await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    let map = data.as_object().unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map["EmailSenderJob"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn recent_for_job_is_capped() {
    let store = Arc::new(MemoryLogStore::new());
    for hour in 0..(RECENT_LIMIT + 10) {
        store.append("busy", run("busy", hour, true)).await.unwrap();
    }
    let app = build_test_app(store);

    let response = get(app, "/job-monitor/busy/all").await;

    let records = body_json(response).await["data"].as_array().unwrap().len();
    assert_eq!(records as i64, RECENT_LIMIT);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_paging_is_a_400() {
    for uri in [
        "/job-monitor/paged?page=-1",
        "/job-monitor/paged?size=0",
        "/job-monitor/paged?size=101",
    ] {
        let app = build_test_app(seeded_store().await);
        let response = get(app, uri).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn malformed_date_is_a_400() {
    let app = build_test_app(seeded_store().await);

    let response = get(app, "/job-monitor?end_date=tomorrow").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

struct BrokenStore;

fn broken() -> CoreError {
    CoreError::storage(std::io::Error::other("connection reset"))
}

#[async_trait]
impl LogStore for BrokenStore {
    async fn append(&self, _: &str, _: ExecutionRecord) -> Result<(), CoreError> {
        Err(broken())
    }

    async fn query_by_job(
        &self,
        _: &str,
        _: &QueryParams,
    ) -> Result<PageResult<ExecutionRecord>, CoreError> {
        Err(broken())
    }

    async fn query_all(&self, _: &QueryParams) -> Result<PageResult<ExecutionRecord>, CoreError> {
        Err(broken())
    }

    async fn all_by_job(&self) -> Result<BTreeMap<String, Vec<ExecutionRecord>>, CoreError> {
        Err(broken())
    }
}

#[tokio::test]
async fn storage_failure_is_a_503() {
    let app = build_test_app(Arc::new(BrokenStore));

    let response = get(app, "/job-monitor/paged").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["code"], "STORAGE_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("connection reset"));
}

struct PanickingStore;

#[async_trait]
impl LogStore for PanickingStore {
    async fn append(&self, _: &str, _: ExecutionRecord) -> Result<(), CoreError> {
        panic!("append invariant violated")
    }

    async fn query_by_job(
        &self,
        _: &str,
        _: &QueryParams,
    ) -> Result<PageResult<ExecutionRecord>, CoreError> {
        panic!("query invariant violated")
    }

    async fn query_all(&self, _: &QueryParams) -> Result<PageResult<ExecutionRecord>, CoreError> {
        panic!("query invariant violated")
    }

    async fn all_by_job(&self) -> Result<BTreeMap<String, Vec<ExecutionRecord>>, CoreError> {
        panic!("query invariant violated")
    }
}

#[tokio::test]
async fn handler_panic_is_a_500() {
    let app = build_test_app(Arc::new(PanickingStore));

    let response = get(app, "/job-monitor/paged").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
