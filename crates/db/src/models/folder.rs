//! Folder entity model, membership link and DTOs.

use promptbox_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A `folders` row with its computed member count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Folder {
    pub id: DbId,
    pub name: String,
    pub style_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `folder_styles` junction table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FolderStyle {
    pub folder_id: DbId,
    pub style_id: DbId,
    pub added_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFolder {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateFolder {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
}

/// Body of `POST /folders/{id}/styles`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddFolderStyle {
    #[validate(length(min = 1))]
    pub style_id: DbId,
}
