//! Repository for the `folders` and `folder_styles` tables.

use chrono::Utc;
use promptbox_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::folder::{CreateFolder, Folder, FolderStyle, UpdateFolder};

/// Folder columns plus the computed member count. Expects alias `f`.
const COLUMNS: &str = "f.id, f.name, \
     (SELECT COUNT(*) FROM folder_styles fs WHERE fs.folder_id = f.id) AS style_count, \
     f.created_at, f.updated_at";

/// Provides CRUD and membership operations for folders.
pub struct FolderRepo;

impl FolderRepo {
    /// All folders, oldest first.
    pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<Folder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM folders f ORDER BY f.created_at, f.rowid");
        sqlx::query_as::<_, Folder>(&query).fetch_all(conn).await
    }

    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: &str,
    ) -> Result<Option<Folder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM folders f WHERE f.id = ?1");
        sqlx::query_as::<_, Folder>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn exists(conn: &mut SqliteConnection, id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM folders WHERE id = ?1)")
            .bind(id)
            .fetch_one(conn)
            .await
    }

    /// Insert a new folder under `id`, returning the created row.
    pub async fn create(
        conn: &mut SqliteConnection,
        id: &str,
        input: &CreateFolder,
    ) -> Result<Folder, sqlx::Error> {
        sqlx::query(
            "INSERT INTO folders (id, name, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
        )
        .bind(id)
        .bind(&input.name)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

        Self::find_by_id(conn, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Update a folder. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut SqliteConnection,
        id: &str,
        input: &UpdateFolder,
    ) -> Result<Option<Folder>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE folders SET name = COALESCE(?2, name), updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(conn, id).await
    }

    /// Delete a folder and, through the cascade, its links.
    pub async fn delete(conn: &mut SqliteConnection, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM folders WHERE id = ?1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn link_exists(
        conn: &mut SqliteConnection,
        folder_id: &str,
        style_id: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM folder_styles WHERE folder_id = ?1 AND style_id = ?2)",
        )
        .bind(folder_id)
        .bind(style_id)
        .fetch_one(conn)
        .await
    }

    /// Link a style into a folder. A duplicate pair fails with a unique
    /// violation on the composite primary key.
    pub async fn add_style(
        conn: &mut SqliteConnection,
        folder_id: &str,
        style_id: &str,
    ) -> Result<FolderStyle, sqlx::Error> {
        sqlx::query_as::<_, FolderStyle>(
            "INSERT INTO folder_styles (folder_id, style_id, added_at)
             VALUES (?1, ?2, ?3)
             RETURNING folder_id, style_id, added_at",
        )
        .bind(folder_id)
        .bind(style_id)
        .bind(Utc::now())
        .fetch_one(conn)
        .await
    }

    /// Remove a link. Returns `true` if the pair existed.
    pub async fn remove_style(
        conn: &mut SqliteConnection,
        folder_id: &str,
        style_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM folder_styles WHERE folder_id = ?1 AND style_id = ?2")
                .bind(folder_id)
                .bind(style_id)
                .execute(conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Ids of the styles in a folder, in the order they were added.
    pub async fn style_ids(
        conn: &mut SqliteConnection,
        folder_id: &str,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT style_id FROM folder_styles WHERE folder_id = ?1 ORDER BY added_at, rowid",
        )
        .bind(folder_id)
        .fetch_all(conn)
        .await
    }
}
