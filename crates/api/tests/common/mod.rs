#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use promptbox_api::config::ServerConfig;
use promptbox_api::router::build_app_router;
use promptbox_api::state::AppState;
use promptbox_db::DbPool;

/// Build a test `ServerConfig` with safe defaults.
///
/// Pagination limits match the production defaults (20 / 100).
pub fn test_config(storage_path: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        audio_path: storage_path.join("audio"),
        storage_path,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        default_page_size: 20,
        max_page_size: 100,
    }
}

/// A migrated single-connection in-memory database.
pub async fn test_pool() -> DbPool {
    let pool = promptbox_db::connect_in_memory().await.unwrap();
    promptbox_db::run_migrations(&pool).await.unwrap();
    pool
}

/// Build the full application router over `pool`, serving `/storage` from
/// the system temp directory.
pub fn build_test_app(pool: DbPool) -> Router {
    build_test_app_with_storage(pool, std::env::temp_dir())
}

/// Build the full application router with an explicit storage directory.
pub fn build_test_app_with_storage(pool: DbPool, storage_path: PathBuf) -> Router {
    let config = test_config(storage_path);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a genre and return its JSON.
pub async fn create_genre(
    pool: &DbPool,
    id: &str,
    parent_id: Option<&str>,
    level: i32,
) -> serde_json::Value {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/genres",
        serde_json::json!({ "id": id, "name": id, "parent_id": parent_id, "level": level }),
    )
    .await;
    assert_eq!(response.status(), 201, "creating genre {id}");
    body_json(response).await
}

/// Create a style and return its generated id.
pub async fn create_style(
    pool: &DbPool,
    name: &str,
    tags: &[&str],
    genre_id: Option<&str>,
) -> String {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/styles",
        serde_json::json!({ "name": name, "tags": tags, "genre_id": genre_id }),
    )
    .await;
    assert_eq!(response.status(), 201, "creating style {name}");
    body_json(response).await["id"].as_str().unwrap().to_string()
}

/// Create a folder and return its generated id.
pub async fn create_folder(pool: &DbPool, name: &str) -> String {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/folders",
        serde_json::json!({ "name": name }),
    )
    .await;
    assert_eq!(response.status(), 201, "creating folder {name}");
    body_json(response).await["id"].as_str().unwrap().to_string()
}
