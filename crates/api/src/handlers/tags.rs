//! Handlers for tag usage statistics.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use promptbox_core::tags::clamp_hot_limit;
use promptbox_db::models::tag_stat::TagCopyRequest;
use promptbox_db::repositories::TagStatRepo;

use crate::error::AppResult;
use crate::query::HotTagParams;
use crate::state::AppState;

/// GET /api/tags/hot
///
/// Most-copied tags first. `limit` defaults to 20 and is clamped to 1..=100.
pub async fn hot_tags(
    State(state): State<AppState>,
    Query(params): Query<HotTagParams>,
) -> AppResult<impl IntoResponse> {
    let mut conn = state.pool.acquire().await?;
    let tags = TagStatRepo::hot(&mut conn, clamp_hot_limit(params.limit)).await?;
    Ok(Json(tags))
}

/// POST /api/tags/copy
///
/// Record one copy per tag. Tags are trimmed and lowercased; blanks are ignored.
pub async fn record_copies(
    State(state): State<AppState>,
    Json(input): Json<TagCopyRequest>,
) -> AppResult<impl IntoResponse> {
    let mut tx = state.pool.begin().await?;
    let recorded = TagStatRepo::record_copies(&mut tx, &input.tags).await?;
    tx.commit().await?;

    tracing::debug!(recorded, "Tag copies recorded");

    Ok(StatusCode::NO_CONTENT)
}
