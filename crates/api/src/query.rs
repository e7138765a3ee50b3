//! Query parameter types for API handlers.

use promptbox_core::transfer::{ExportScope, ImportMode};
use promptbox_core::types::DbId;
use serde::Deserialize;

/// `GET /styles` filters and paging (`?genre_id=&search=&folder_id=&page=&size=`).
///
/// Paging values are checked against the configured limits by
/// `PageRequest::resolve`.
#[derive(Debug, Default, Deserialize)]
pub struct StyleListParams {
    pub genre_id: Option<DbId>,
    pub search: Option<String>,
    pub folder_id: Option<DbId>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// `GET /tags/hot?limit=`. The limit is clamped, never rejected.
#[derive(Debug, Default, Deserialize)]
pub struct HotTagParams {
    pub limit: Option<i64>,
}

/// `GET /data/export?scope=&genre_id=&folder_id=`.
#[derive(Debug, Default, Deserialize)]
pub struct ExportParams {
    #[serde(default)]
    pub scope: ExportScope,
    pub genre_id: Option<DbId>,
    pub folder_id: Option<DbId>,
}

/// `POST /data/import?mode=`. The mode is required.
#[derive(Debug, Deserialize)]
pub struct ImportParams {
    pub mode: ImportMode,
}
