//! Genre entity model and DTOs.

use promptbox_core::genre_tree::TreeNode;
use promptbox_core::transfer::GenreRecord;
use promptbox_core::types::{nullable, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `genres` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Genre {
    pub id: DbId,
    pub name: String,
    pub parent_id: Option<DbId>,
    pub level: i32,
    pub sort_order: i32,
    pub description: Option<String>,
    pub era_prompt: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TreeNode for Genre {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    fn sort_order(&self) -> i32 {
        self.sort_order
    }
}

impl From<Genre> for GenreRecord {
    fn from(genre: Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
            parent_id: genre.parent_id,
            level: genre.level,
            sort_order: genre.sort_order,
            description: genre.description,
            era_prompt: genre.era_prompt,
        }
    }
}

/// A genre with its nested children, as returned by the tree listing.
#[derive(Debug, Clone, Serialize)]
pub struct GenreTreeNode {
    #[serde(flatten)]
    pub genre: Genre,
    pub children: Vec<GenreTreeNode>,
}

/// DTO for creating a genre. The id is chosen by the client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGenre {
    #[validate(length(min = 1, max = 50))]
    pub id: DbId,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub parent_id: Option<DbId>,
    #[serde(default = "default_level")]
    #[validate(range(min = 1, max = 3))]
    pub level: i32,
    #[serde(default)]
    pub sort_order: i32,
    pub description: Option<String>,
    pub era_prompt: Option<String>,
}

fn default_level() -> i32 {
    1
}

/// DTO for updating a genre. All fields are optional; an explicit `null`
/// on `parent_id`, `description` or `era_prompt` clears the column.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGenre {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub parent_id: Option<Option<DbId>>,
    #[validate(range(min = 1, max = 3))]
    pub level: Option<i32>,
    pub sort_order: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub era_prompt: Option<Option<String>>,
}
