//! Style entity model and DTOs.
//!
//! Tags live in the `tags_json` column as a JSON array; [`StyleRow`] carries
//! the raw column and [`Style`] the decoded list.

use promptbox_core::tags::decode_tags;
use promptbox_core::transfer::StyleRecord;
use promptbox_core::types::{nullable, AudioType, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A `styles` row joined with its genre name and favorite flag.
#[derive(Debug, Clone, FromRow)]
pub struct StyleRow {
    pub id: DbId,
    pub name: String,
    pub tags_json: String,
    pub genre_id: Option<DbId>,
    pub description: Option<String>,
    pub bpm_range: Option<String>,
    pub audio_type: Option<String>,
    pub audio_source: Option<String>,
    pub reference_url: Option<String>,
    pub copy_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub genre_name: Option<String>,
    pub is_favorited: bool,
}

/// The style view returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct Style {
    pub id: DbId,
    pub name: String,
    pub tags: Vec<String>,
    pub genre_id: Option<DbId>,
    pub genre_name: Option<String>,
    pub description: Option<String>,
    pub bpm_range: Option<String>,
    pub audio_type: Option<AudioType>,
    pub audio_source: Option<String>,
    pub reference_url: Option<String>,
    pub copy_count: i64,
    pub is_favorited: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<StyleRow> for Style {
    type Error = sqlx::Error;

    fn try_from(row: StyleRow) -> Result<Self, Self::Error> {
        let tags = decode_tags(&row.tags_json).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        let audio_type = row
            .audio_type
            .as_deref()
            .map(str::parse::<AudioType>)
            .transpose()
            .map_err(|e| sqlx::Error::Decode(e.into()))?;

        Ok(Self {
            id: row.id,
            name: row.name,
            tags,
            genre_id: row.genre_id,
            genre_name: row.genre_name,
            description: row.description,
            bpm_range: row.bpm_range,
            audio_type,
            audio_source: row.audio_source,
            reference_url: row.reference_url,
            copy_count: row.copy_count,
            is_favorited: row.is_favorited,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl From<Style> for StyleRecord {
    fn from(style: Style) -> Self {
        Self {
            id: style.id,
            name: style.name,
            tags: style.tags,
            genre_id: style.genre_id,
            description: style.description,
            bpm_range: style.bpm_range,
            audio_type: style.audio_type,
            audio_source: style.audio_source,
            reference_url: style.reference_url,
            copy_count: style.copy_count,
        }
    }
}

/// DTO for creating a style. The id is generated server-side.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStyle {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, message = "at least one tag is required"))]
    pub tags: Vec<String>,
    pub genre_id: Option<DbId>,
    pub description: Option<String>,
    #[validate(length(max = 20))]
    pub bpm_range: Option<String>,
    pub audio_type: Option<AudioType>,
    pub audio_source: Option<String>,
    pub reference_url: Option<String>,
}

/// DTO for updating a style. `tags`, when present, replaces the whole list.
///
/// Nullable columns use `Option<Option<T>>`: the outer `None` keeps the
/// stored value, `Some(None)` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStyle {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "at least one tag is required"))]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub genre_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 20))]
    pub bpm_range: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub audio_type: Option<Option<AudioType>>,
    #[serde(default, deserialize_with = "nullable")]
    pub audio_source: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub reference_url: Option<Option<String>>,
}

/// Filters for the style listing. All present filters must match.
#[derive(Debug, Clone, Default)]
pub struct StyleFilter {
    /// Restrict to these genre ids (already expanded to a subtree).
    pub genre_ids: Option<Vec<DbId>>,
    /// Case-insensitive substring over name, tags, description and bpm range.
    pub search: Option<String>,
    /// Restrict to members of this folder.
    pub folder_id: Option<DbId>,
}
