//! Integration tests for `CatalogClient` and catalog loading.
//!
//! Uses `wiremock` to stand up a local HTTP server per test so no real
//! network traffic is made.

use std::path::PathBuf;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use btools_catalog::{
    load_catalog, load_catalog_or_fallback, CatalogClient, CatalogError, CatalogOrigin,
    CatalogSource,
};

fn test_client() -> CatalogClient {
    CatalogClient::new(5, "btools-test/0.1", 0, 0).expect("failed to build test CatalogClient")
}

fn test_client_with_retries(max_retries: u32) -> CatalogClient {
    CatalogClient::new(5, "btools-test/0.1", max_retries, 0)
        .expect("failed to build test CatalogClient")
}

fn catalog_json() -> serde_json::Value {
    json!([
        {"id": "b1", "name": "One", "subscribers": 1000, "er": 2.0},
        {"id": "b2", "name": "Two", "followers": "50000", "pricing": {"integrated": 100, "currency": "RUB"}}
    ])
}

#[tokio::test]
async fn fetch_catalog_returns_raw_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/bloggers.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_json()))
        .expect(1)
        .mount(&server)
        .await;

    let records = test_client()
        .fetch_catalog(&format!("{}/json/bloggers.json", server.uri()))
        .await
        .expect("fetch");
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn load_catalog_normalizes_http_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/bloggers.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_json()))
        .mount(&server)
        .await;

    let source = CatalogSource::parse(&format!("{}/json/bloggers.json", server.uri()));
    let bloggers = load_catalog(&source, &test_client()).await.expect("load");
    assert_eq!(bloggers[1].followers, 50_000);
    assert!((bloggers[1].usd_price().unwrap() - 1.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn fetch_catalog_maps_404_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client_with_retries(3)
        .fetch_catalog(&format!("{}/missing.json", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }), "got {err:?}");
}

#[tokio::test]
async fn fetch_catalog_maps_429_with_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "12"))
        .mount(&server)
        .await;

    let err = test_client()
        .fetch_catalog(&format!("{}/bloggers.json", server.uri()))
        .await
        .unwrap_err();
    assert!(
        matches!(err, CatalogError::RateLimited { retry_after_secs: 12, .. }),
        "got {err:?}"
    );
}

#[tokio::test]
async fn fetch_catalog_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_json()))
        .mount(&server)
        .await;

    let records = test_client_with_retries(2)
        .fetch_catalog(&format!("{}/bloggers.json", server.uri()))
        .await
        .expect("fetch after retry");
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn fetch_catalog_reports_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client()
        .fetch_catalog(&format!("{}/bloggers.json", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Deserialize { .. }), "got {err:?}");
}

#[tokio::test]
async fn fallback_replaces_unreachable_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let source = CatalogSource::parse(&format!("{}/bloggers.json", server.uri()));
    let loaded = load_catalog_or_fallback(&source, &test_client()).await;
    assert_eq!(loaded.origin, CatalogOrigin::Fallback);
    assert_eq!(loaded.bloggers.len(), 3);
}

#[tokio::test]
async fn fallback_replaces_missing_file() {
    let source = CatalogSource::File(PathBuf::from("/nonexistent/btools/bloggers.json"));
    let loaded = load_catalog_or_fallback(&source, &test_client()).await;
    assert_eq!(loaded.origin, CatalogOrigin::Fallback);
}

#[tokio::test]
async fn load_catalog_reads_local_file() {
    let dir = std::env::temp_dir().join(format!("btools-catalog-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let file = dir.join("bloggers.json");
    std::fs::write(&file, catalog_json().to_string()).expect("write catalog");

    let loaded = load_catalog_or_fallback(&CatalogSource::File(file), &test_client()).await;
    assert_eq!(loaded.origin, CatalogOrigin::Source);
    assert_eq!(loaded.bloggers.len(), 2);

    std::fs::remove_dir_all(&dir).ok();
}
