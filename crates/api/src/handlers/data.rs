//! Handlers for bulk catalog export and import.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use promptbox_core::transfer::{ImportSummary, TransferDocument};
use promptbox_db::repositories::TransferRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::query::{ExportParams, ImportParams};
use crate::state::AppState;

/// Response body of `POST /api/data/import`.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub summary: ImportSummary,
}

/// GET /api/data/export
///
/// `scope=all|genre|folder` selects the styles; genres and folders are
/// always exported in full. A scope without its id parameter exports all
/// styles.
pub async fn export_data(
    State(state): State<AppState>,
    Query(params): Query<ExportParams>,
) -> AppResult<impl IntoResponse> {
    let selection = params.scope.select(params.genre_id, params.folder_id);

    let mut tx = state.pool.begin().await?;
    let data = TransferRepo::export(&mut tx, &selection).await?;
    tx.commit().await?;

    tracing::info!(
        selection = ?selection,
        genres = data.genres.len(),
        styles = data.styles.len(),
        folders = data.folders.len(),
        "Catalog exported",
    );

    Ok(Json(TransferDocument::new(data)))
}

/// POST /api/data/import?mode=overwrite|merge
///
/// The whole import runs in one transaction. Unsupported document versions
/// are rejected before anything is touched.
pub async fn import_data(
    State(state): State<AppState>,
    Query(params): Query<ImportParams>,
    Json(document): Json<TransferDocument>,
) -> AppResult<impl IntoResponse> {
    document.check_version()?;

    let mut tx = state.pool.begin().await?;
    let summary = TransferRepo::import(&mut tx, &document.data, params.mode).await?;
    tx.commit().await?;

    Ok(Json(ImportResponse {
        message: "Import successful",
        summary,
    }))
}
