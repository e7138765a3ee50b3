//! Bulk export and import of the whole catalog.
//!
//! Both operations run on a caller-supplied connection; the API wraps an
//! import in a single transaction so a failure leaves the catalog untouched.

use chrono::Utc;
use promptbox_core::genre_tree::GenreIndex;
use promptbox_core::tags::encode_tags;
use promptbox_core::transfer::{
    FolderRecord, GenreRecord, ImportMode, ImportSummary, StyleRecord, StyleSelection,
    TransferData,
};
use sqlx::SqliteConnection;

use crate::repositories::{FolderRepo, GenreRepo, StyleRepo};

pub struct TransferRepo;

impl TransferRepo {
    /// Collect the export payload. Genres and folders are always complete;
    /// styles follow `selection`.
    pub async fn export(
        conn: &mut SqliteConnection,
        selection: &StyleSelection,
    ) -> Result<TransferData, sqlx::Error> {
        let genres = GenreRepo::list_all(&mut *conn)
            .await?
            .into_iter()
            .map(GenreRecord::from)
            .collect();

        let styles = match selection {
            StyleSelection::All => StyleRepo::list_all(&mut *conn).await?,
            StyleSelection::Genre(id) => StyleRepo::list_by_genre(&mut *conn, id).await?,
            StyleSelection::Folder(id) => StyleRepo::list_by_folder(&mut *conn, id).await?,
        }
        .into_iter()
        .map(StyleRecord::from)
        .collect();

        let mut folders = Vec::new();
        for folder in FolderRepo::list(&mut *conn).await? {
            let style_ids = FolderRepo::style_ids(&mut *conn, &folder.id).await?;
            folders.push(FolderRecord {
                id: folder.id,
                name: folder.name,
                style_ids,
            });
        }

        Ok(TransferData {
            genres,
            styles,
            folders,
        })
    }

    /// Load a document into the catalog.
    ///
    /// Overwrite clears every catalog table first; merge skips records whose
    /// id already exists. Genres are inserted parents first. Folder links are
    /// created only for newly inserted folders and only towards styles that
    /// exist once the styles pass is done. Tag statistics are not touched.
    pub async fn import(
        conn: &mut SqliteConnection,
        data: &TransferData,
        mode: ImportMode,
    ) -> Result<ImportSummary, sqlx::Error> {
        if mode == ImportMode::Overwrite {
            Self::clear(&mut *conn).await?;
        }

        let merge = mode == ImportMode::Merge;
        let now = Utc::now();
        let mut summary = ImportSummary::default();

        for genre in GenreIndex::new(&data.genres).parents_first() {
            if merge && GenreRepo::exists(&mut *conn, &genre.id).await? {
                continue;
            }
            sqlx::query(
                "INSERT INTO genres
                    (id, name, parent_id, level, sort_order, description, era_prompt, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
            )
            .bind(&genre.id)
            .bind(&genre.name)
            .bind(&genre.parent_id)
            .bind(genre.level)
            .bind(genre.sort_order)
            .bind(&genre.description)
            .bind(&genre.era_prompt)
            .bind(now)
            .execute(&mut *conn)
            .await?;
            summary.genres_imported += 1;
        }

        for style in &data.styles {
            if merge && StyleRepo::exists(&mut *conn, &style.id).await? {
                continue;
            }
            let tags_json =
                encode_tags(&style.tags).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
            sqlx::query(
                "INSERT INTO styles
                    (id, name, tags_json, genre_id, description, bpm_range,
                     audio_type, audio_source, reference_url, copy_count, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
            )
            .bind(&style.id)
            .bind(&style.name)
            .bind(&tags_json)
            .bind(&style.genre_id)
            .bind(&style.description)
            .bind(&style.bpm_range)
            .bind(style.audio_type.map(|t| t.as_str()))
            .bind(&style.audio_source)
            .bind(&style.reference_url)
            .bind(style.copy_count)
            .bind(now)
            .execute(&mut *conn)
            .await?;
            summary.styles_imported += 1;
        }

        for folder in &data.folders {
            if merge && FolderRepo::exists(&mut *conn, &folder.id).await? {
                continue;
            }
            sqlx::query(
                "INSERT INTO folders (id, name, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
            )
            .bind(&folder.id)
            .bind(&folder.name)
            .bind(now)
            .execute(&mut *conn)
            .await?;
            summary.folders_imported += 1;

            for style_id in &folder.style_ids {
                let result = sqlx::query(
                    "INSERT OR IGNORE INTO folder_styles (folder_id, style_id, added_at)
                     SELECT ?1, id, ?3 FROM styles WHERE id = ?2",
                )
                .bind(&folder.id)
                .bind(style_id)
                .bind(now)
                .execute(&mut *conn)
                .await?;
                summary.links_imported += result.rows_affected();
            }
        }

        tracing::info!(
            mode = ?mode,
            genres = summary.genres_imported,
            styles = summary.styles_imported,
            folders = summary.folders_imported,
            links = summary.links_imported,
            "Catalog imported",
        );

        Ok(summary)
    }

    /// Delete every genre, style, folder and link, children before parents.
    async fn clear(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
        for table in ["folder_styles", "styles", "folders", "genres"] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }
}
