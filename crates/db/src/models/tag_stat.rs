//! Tag usage statistics.

use promptbox_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tag_stats` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TagStat {
    pub tag: String,
    pub copy_count: i64,
    pub last_copied_at: Option<Timestamp>,
}

/// Body of `POST /tags/copy`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagCopyRequest {
    pub tags: Vec<String>,
}
