//! Handlers for the style catalog.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use promptbox_core::error::CoreError;
use promptbox_core::pagination::{Page, PageRequest};
use promptbox_core::types::{generate_id, DbId};
use promptbox_core::validation::validate;
use promptbox_db::models::style::{CreateStyle, StyleFilter, UpdateStyle};
use promptbox_db::repositories::{GenreRepo, StyleRepo};
use promptbox_db::DbConn;

use crate::error::AppResult;
use crate::query::StyleListParams;
use crate::state::AppState;

/// GET /api/styles
///
/// Newest styles first. `genre_id` matches the genre and everything beneath
/// it; `search` is a case-insensitive substring over name, tags, description
/// and bpm range; `folder_id` restricts to a folder's members.
pub async fn list_styles(
    State(state): State<AppState>,
    Query(params): Query<StyleListParams>,
) -> AppResult<impl IntoResponse> {
    let request = PageRequest::resolve(
        params.page,
        params.size,
        state.config.default_page_size,
        state.config.max_page_size,
    )?;

    let mut tx = state.pool.begin().await?;

    let genre_ids = match params.genre_id.as_deref().filter(|id| !id.is_empty()) {
        Some(genre_id) => Some(GenreRepo::subtree_ids(&mut tx, genre_id).await?),
        None => None,
    };
    let filter = StyleFilter {
        genre_ids,
        search: params.search.filter(|s| !s.trim().is_empty()),
        folder_id: params.folder_id.filter(|id| !id.is_empty()),
    };

    let total = StyleRepo::count(&mut tx, &filter).await?;
    let items = StyleRepo::list(&mut tx, &filter, request).await?;
    tx.commit().await?;

    Ok(Json(Page::new(request, total, items)))
}

/// GET /api/styles/{id}
pub async fn get_style(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.pool.acquire().await?;
    let style = StyleRepo::find_by_id(&mut conn, &id)
        .await?
        .ok_or_else(|| CoreError::not_found("Style", id))?;
    Ok(Json(style))
}

/// POST /api/styles
pub async fn create_style(
    State(state): State<AppState>,
    Json(input): Json<CreateStyle>,
) -> AppResult<impl IntoResponse> {
    validate(&input)?;

    let mut tx = state.pool.begin().await?;
    ensure_genre_exists(&mut tx, input.genre_id.as_deref()).await?;

    let id = generate_id("style");
    let style = StyleRepo::create(&mut tx, &id, &input).await?;
    tx.commit().await?;

    tracing::info!(style_id = %style.id, genre_id = ?style.genre_id, "Style created");

    Ok((StatusCode::CREATED, Json(style)))
}

/// PUT /api/styles/{id}
///
/// Partial update; `tags`, when given, replaces the whole list. An explicit
/// `null` clears a nullable field, e.g. `{"genre_id": null}` ungroups the style.
pub async fn update_style(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStyle>,
) -> AppResult<impl IntoResponse> {
    validate(&input)?;

    let mut tx = state.pool.begin().await?;
    if !StyleRepo::exists(&mut tx, &id).await? {
        return Err(CoreError::not_found("Style", id).into());
    }
    ensure_genre_exists(&mut tx, input.genre_id.as_ref().and_then(Option::as_deref)).await?;

    let style = StyleRepo::update(&mut tx, &id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Style", id))?;
    tx.commit().await?;

    tracing::info!(style_id = %style.id, "Style updated");

    Ok(Json(style))
}

/// DELETE /api/styles/{id}
pub async fn delete_style(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;
    if !StyleRepo::delete(&mut tx, &id).await? {
        return Err(CoreError::not_found("Style", id).into());
    }
    tx.commit().await?;

    tracing::info!(style_id = %id, "Style deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/styles/{id}/copy
///
/// Count one copy of the style's prompt.
pub async fn copy_style(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;
    if !StyleRepo::increment_copy_count(&mut tx, &id).await? {
        return Err(CoreError::not_found("Style", id).into());
    }
    tx.commit().await?;

    tracing::debug!(style_id = %id, "Style copy recorded");

    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_genre_exists(conn: &mut DbConn, genre_id: Option<&str>) -> AppResult<()> {
    if let Some(genre_id) = genre_id {
        if !GenreRepo::exists(conn, genre_id).await? {
            return Err(CoreError::BadRequest(format!("Genre '{genre_id}' not found")).into());
        }
    }
    Ok(())
}
