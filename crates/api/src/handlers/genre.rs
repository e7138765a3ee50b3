//! Handlers for the genre taxonomy.
//!
//! Genre ids are chosen by the client. Deleting a genre removes its whole
//! subtree; styles in the subtree survive with their genre cleared.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use promptbox_core::error::CoreError;
use promptbox_core::genre_tree::GenreIndex;
use promptbox_core::types::DbId;
use promptbox_core::validation::validate;
use promptbox_db::models::genre::{CreateGenre, UpdateGenre};
use promptbox_db::repositories::GenreRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/genres
///
/// The full genre tree, roots and children ordered by `sort_order`.
pub async fn list_genres(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut conn = state.pool.acquire().await?;
    let tree = GenreRepo::tree(&mut conn).await?;
    Ok(Json(tree))
}

/// GET /api/genres/{id}
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.pool.acquire().await?;
    let genre = GenreRepo::find_by_id(&mut conn, &id)
        .await?
        .ok_or_else(|| CoreError::not_found("Genre", id))?;
    Ok(Json(genre))
}

/// POST /api/genres
pub async fn create_genre(
    State(state): State<AppState>,
    Json(input): Json<CreateGenre>,
) -> AppResult<impl IntoResponse> {
    validate(&input)?;

    let mut tx = state.pool.begin().await?;

    if GenreRepo::exists(&mut tx, &input.id).await? {
        return Err(CoreError::Conflict(format!("Genre id '{}' already exists", input.id)).into());
    }
    if let Some(parent_id) = &input.parent_id {
        if !GenreRepo::exists(&mut tx, parent_id).await? {
            return Err(CoreError::BadRequest("Parent genre not found".into()).into());
        }
    }

    let genre = GenreRepo::create(&mut tx, &input).await?;
    tx.commit().await?;

    tracing::info!(genre_id = %genre.id, parent_id = ?genre.parent_id, "Genre created");

    Ok((StatusCode::CREATED, Json(genre)))
}

/// PUT /api/genres/{id}
///
/// Partial update. A new `parent_id` must exist and must not lie inside the
/// genre's own subtree; `"parent_id": null` makes the genre a root.
pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGenre>,
) -> AppResult<impl IntoResponse> {
    validate(&input)?;

    let mut tx = state.pool.begin().await?;

    if let Some(Some(parent_id)) = &input.parent_id {
        let genres = GenreRepo::list_all(&mut tx).await?;
        let index = GenreIndex::new(&genres);
        if !index.contains(&id) {
            return Err(CoreError::not_found("Genre", id).into());
        }
        if !index.contains(parent_id) {
            return Err(CoreError::BadRequest("Parent genre not found".into()).into());
        }
        if index.is_within(&id, parent_id) {
            return Err(CoreError::BadRequest(
                "A genre cannot be moved beneath itself or its descendants".into(),
            )
            .into());
        }
    }

    let genre = GenreRepo::update(&mut tx, &id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Genre", id))?;
    tx.commit().await?;

    tracing::info!(genre_id = %genre.id, "Genre updated");

    Ok(Json(genre))
}

/// DELETE /api/genres/{id}
pub async fn delete_genre(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;
    if !GenreRepo::delete(&mut tx, &id).await? {
        return Err(CoreError::not_found("Genre", id).into());
    }
    tx.commit().await?;

    tracing::info!(genre_id = %id, "Genre deleted with its subtree");

    Ok(StatusCode::NO_CONTENT)
}
