//! Handlers for folders and their style membership.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use promptbox_core::error::CoreError;
use promptbox_core::types::{generate_id, DbId};
use promptbox_core::validation::validate;
use promptbox_db::models::folder::{AddFolderStyle, CreateFolder, UpdateFolder};
use promptbox_db::repositories::{FolderRepo, StyleRepo};

use crate::error::AppResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Folder CRUD
// ---------------------------------------------------------------------------

/// GET /api/folders
///
/// All folders, oldest first, each with its `style_count`.
pub async fn list_folders(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut conn = state.pool.acquire().await?;
    let folders = FolderRepo::list(&mut conn).await?;
    Ok(Json(folders))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.pool.acquire().await?;
    let folder = FolderRepo::find_by_id(&mut conn, &id)
        .await?
        .ok_or_else(|| CoreError::not_found("Folder", id))?;
    Ok(Json(folder))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    Json(input): Json<CreateFolder>,
) -> AppResult<impl IntoResponse> {
    validate(&input)?;

    let mut tx = state.pool.begin().await?;
    let folder = FolderRepo::create(&mut tx, &generate_id("folder"), &input).await?;
    tx.commit().await?;

    tracing::info!(folder_id = %folder.id, "Folder created");

    Ok((StatusCode::CREATED, Json(folder)))
}

/// PUT /api/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFolder>,
) -> AppResult<impl IntoResponse> {
    validate(&input)?;

    let mut tx = state.pool.begin().await?;
    let folder = FolderRepo::update(&mut tx, &id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Folder", id))?;
    tx.commit().await?;

    tracing::info!(folder_id = %folder.id, "Folder updated");

    Ok(Json(folder))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;
    if !FolderRepo::delete(&mut tx, &id).await? {
        return Err(CoreError::not_found("Folder", id).into());
    }
    tx.commit().await?;

    tracing::info!(folder_id = %id, "Folder deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Membership
// ---------------------------------------------------------------------------

/// POST /api/folders/{id}/styles
///
/// Bookmark a style into the folder. Returns the created link.
pub async fn add_style(
    State(state): State<AppState>,
    Path(folder_id): Path<DbId>,
    Json(input): Json<AddFolderStyle>,
) -> AppResult<impl IntoResponse> {
    validate(&input)?;

    let mut tx = state.pool.begin().await?;

    if !FolderRepo::exists(&mut tx, &folder_id).await? {
        return Err(CoreError::not_found("Folder", folder_id).into());
    }
    if !StyleRepo::exists(&mut tx, &input.style_id).await? {
        return Err(CoreError::not_found("Style", input.style_id).into());
    }
    if FolderRepo::link_exists(&mut tx, &folder_id, &input.style_id).await? {
        return Err(CoreError::Conflict("Style already in folder".into()).into());
    }

    let link = FolderRepo::add_style(&mut tx, &folder_id, &input.style_id).await?;
    tx.commit().await?;

    tracing::info!(folder_id = %link.folder_id, style_id = %link.style_id, "Style added to folder");

    Ok((StatusCode::CREATED, Json(link)))
}

/// DELETE /api/folders/{id}/styles/{style_id}
pub async fn remove_style(
    State(state): State<AppState>,
    Path((folder_id, style_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;
    if !FolderRepo::remove_style(&mut tx, &folder_id, &style_id).await? {
        return Err(CoreError::NotFound {
            entity: "FolderStyle",
            id: format!("{folder_id}/{style_id}"),
        }
        .into());
    }
    tx.commit().await?;

    tracing::info!(folder_id = %folder_id, style_id = %style_id, "Style removed from folder");

    Ok(StatusCode::NO_CONTENT)
}
