//! Catalog export/import document format.
//!
//! An export is a versioned JSON envelope:
//!
//! ```text
//! { "version": "1.0", "exported_at": "...", "data": { "genres": [], "styles": [], "folders": [] } }
//! ```
//!
//! Each record is the flat field set of its table. Folders carry the ids of
//! their member styles instead of separate link rows.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::genre_tree::TreeNode;
use crate::types::{AudioType, DbId, Timestamp};

/// The only document version this build reads and writes.
pub const EXPORT_VERSION: &str = "1.0";

// ---------------------------------------------------------------------------
// Query enums
// ---------------------------------------------------------------------------

/// Which styles an export includes. Genres and folders are always complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportScope {
    #[default]
    All,
    Genre,
    Folder,
}

/// The concrete style filter after combining a scope with its id parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSelection {
    All,
    /// Styles whose `genre_id` equals this id exactly (no subtree expansion).
    Genre(DbId),
    /// Styles linked to this folder.
    Folder(DbId),
}

impl ExportScope {
    /// Combine the scope with the optional id parameters. A scope whose id
    /// parameter is missing falls back to all styles.
    pub fn select(self, genre_id: Option<DbId>, folder_id: Option<DbId>) -> StyleSelection {
        match (self, genre_id, folder_id) {
            (Self::Genre, Some(id), _) => StyleSelection::Genre(id),
            (Self::Folder, _, Some(id)) => StyleSelection::Folder(id),
            _ => StyleSelection::All,
        }
    }
}

/// How an import treats the existing catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Wipe genres, styles, folders and links, then insert the document.
    Overwrite,
    /// Insert only records whose id is not already present.
    Merge,
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferDocument {
    pub version: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub exported_at: Timestamp,
    pub data: TransferData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransferData {
    #[serde(default)]
    pub genres: Vec<GenreRecord>,
    #[serde(default)]
    pub styles: Vec<StyleRecord>,
    #[serde(default)]
    pub folders: Vec<FolderRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreRecord {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<DbId>,
    #[serde(default = "default_level")]
    pub level: i32,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub era_prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRecord {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub genre_id: Option<DbId>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub bpm_range: Option<String>,
    #[serde(default)]
    pub audio_type: Option<AudioType>,
    #[serde(default)]
    pub audio_source: Option<String>,
    #[serde(default)]
    pub reference_url: Option<String>,
    #[serde(default)]
    pub copy_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderRecord {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub style_ids: Vec<DbId>,
}

fn default_level() -> i32 {
    1
}

impl TreeNode for GenreRecord {
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

impl TransferDocument {
    /// Wrap exported records in a current-version envelope.
    pub fn new(data: TransferData) -> Self {
        Self {
            version: EXPORT_VERSION.to_string(),
            exported_at: Utc::now(),
            data,
        }
    }

    /// Reject documents written by an unsupported exporter.
    pub fn check_version(&self) -> Result<(), CoreError> {
        if self.version == EXPORT_VERSION {
            Ok(())
        } else {
            Err(CoreError::BadRequest(format!(
                "Unsupported version: {}",
                self.version
            )))
        }
    }
}

/// Counts reported after an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub genres_imported: u64,
    pub styles_imported: u64,
    pub folders_imported: u64,
    pub links_imported: u64,
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Parse an export timestamp. RFC 3339 is preferred; a naive ISO-8601
/// timestamp without offset is read as UTC.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|e| format!("invalid exported_at '{raw}': {e}"))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}
