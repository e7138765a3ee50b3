//! HTTP-level integration tests for folders and folder membership.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_folder, create_style, delete, get, post_json, put_json,
};
use serde_json::json;

async fn add_link(pool: &promptbox_db::DbPool, folder_id: &str, style_id: &str) -> StatusCode {
    post_json(
        build_test_app(pool.clone()),
        &format!("/api/folders/{folder_id}/styles"),
        json!({ "style_id": style_id }),
    )
    .await
    .status()
}

#[tokio::test]
async fn create_and_list_folders_oldest_first() {
    let pool = common::test_pool().await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/folders",
        json!({ "name": "Late night" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].as_str().unwrap().starts_with("folder_"));
    assert_eq!(json["style_count"], 0);

    create_folder(&pool, "Workout").await;

    let json = body_json(get(build_test_app(pool), "/api/folders").await).await;
    let names: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Late night", "Workout"]);
}

#[tokio::test]
async fn create_rejects_blank_name() {
    let pool = common::test_pool().await;
    let response = post_json(build_test_app(pool), "/api/folders", json!({ "name": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn rename_and_unknown_folder() {
    let pool = common::test_pool().await;
    let id = create_folder(&pool, "Old").await;

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/folders/{id}"),
        json!({ "name": "New" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "New");

    let response = put_json(
        build_test_app(pool.clone()),
        "/api/folders/folder_missing",
        json!({ "name": "x" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(build_test_app(pool), "/api/folders/folder_missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn membership_lifecycle() {
    let pool = common::test_pool().await;
    let folder_id = create_folder(&pool, "Faves").await;
    let a = create_style(&pool, "A", &["x"], None).await;
    let b = create_style(&pool, "B", &["y"], None).await;

    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/folders/{folder_id}/styles"),
        json!({ "style_id": a }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let link = body_json(response).await;
    assert_eq!(link["folder_id"], folder_id.as_str());
    assert_eq!(link["style_id"], a.as_str());
    assert!(link["added_at"].is_string());

    assert_eq!(add_link(&pool, &folder_id, &b).await, StatusCode::CREATED);
    assert_eq!(add_link(&pool, &folder_id, &a).await, StatusCode::CONFLICT);

    let json = body_json(get(build_test_app(pool.clone()), &format!("/api/folders/{folder_id}")).await).await;
    assert_eq!(json["style_count"], 2);

    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/folders/{folder_id}/styles/{a}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/folders/{folder_id}/styles/{a}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(get(build_test_app(pool), &format!("/api/folders/{folder_id}")).await).await;
    assert_eq!(json["style_count"], 1);
}

#[tokio::test]
async fn adding_to_missing_folder_or_style_is_404() {
    let pool = common::test_pool().await;
    let folder_id = create_folder(&pool, "Faves").await;
    let style_id = create_style(&pool, "A", &["x"], None).await;

    assert_eq!(
        add_link(&pool, "folder_missing", &style_id).await,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        add_link(&pool, &folder_id, "style_missing").await,
        StatusCode::NOT_FOUND
    );

    let response = post_json(
        build_test_app(pool),
        &format!("/api/folders/{folder_id}/styles"),
        json!({ "style_id": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_folder_keeps_styles() {
    let pool = common::test_pool().await;
    let folder_id = create_folder(&pool, "Temp").await;
    let style_id = create_style(&pool, "Keeper", &["x"], None).await;
    assert_eq!(add_link(&pool, &folder_id, &style_id).await, StatusCode::CREATED);

    let response = delete(build_test_app(pool.clone()), &format!("/api/folders/{folder_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(build_test_app(pool.clone()), &format!("/api/folders/{folder_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(get(build_test_app(pool), &format!("/api/styles/{style_id}")).await).await;
    assert_eq!(json["name"], "Keeper");
    assert_eq!(json["is_favorited"], false);
}
