//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use std::io::Write;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use http_body_util::BodyExt;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = common::build_test_app(common::test_pool().await);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

#[tokio::test]
async fn health_check_is_also_under_api() {
    let app = common::build_test_app(common::test_pool().await);
    let response = get(app, "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn closed_pool_reports_degraded() {
    let pool = common::test_pool().await;
    pool.close().await;

    let response = get(common::build_test_app(pool), "/health").await;
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
}

// ---------------------------------------------------------------------------
// Routing and middleware
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app(common::test_pool().await);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_test_app(common::test_pool().await);
    let response = get(app, "/health").await;

    let request_id = response.headers().get("x-request-id");
    assert!(request_id.is_some(), "x-request-id header must be set");
}

#[tokio::test]
async fn cors_preflight_allows_dev_origin() {
    let app = common::build_test_app(common::test_pool().await);
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/styles")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:5173")
    );
}

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

#[tokio::test]
async fn storage_files_are_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("audio")).unwrap();
    let mut file = std::fs::File::create(dir.path().join("audio").join("demo.txt")).unwrap();
    file.write_all(b"not really audio").unwrap();

    let app = common::build_test_app_with_storage(
        common::test_pool().await,
        dir.path().to_path_buf(),
    );
    let response = get(app.clone(), "/storage/audio/demo.txt").await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"not really audio");

    let response = get(app, "/storage/audio/missing.mp3").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
