//! Repository for the `genres` table.

use chrono::Utc;
use promptbox_core::genre_tree::GenreIndex;
use promptbox_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::genre::{CreateGenre, Genre, GenreTreeNode, UpdateGenre};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, parent_id, level, sort_order, description, era_prompt, created_at, updated_at";

/// Provides CRUD and tree operations for genres.
pub struct GenreRepo;

impl GenreRepo {
    /// All genres, ordered so that parents precede their children.
    pub async fn list_all(conn: &mut SqliteConnection) -> Result<Vec<Genre>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM genres ORDER BY level, sort_order, id");
        sqlx::query_as::<_, Genre>(&query).fetch_all(conn).await
    }

    /// The full genre forest, children sorted by `(sort_order, id)`.
    pub async fn tree(conn: &mut SqliteConnection) -> Result<Vec<GenreTreeNode>, sqlx::Error> {
        let genres = Self::list_all(conn).await?;
        let index = GenreIndex::new(&genres);
        Ok(index.build(|genre, children| GenreTreeNode {
            genre: genre.clone(),
            children,
        }))
    }

    /// `id` plus the ids of every genre beneath it.
    ///
    /// An unknown id expands to itself, which then matches no styles.
    pub async fn subtree_ids(
        conn: &mut SqliteConnection,
        id: &str,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let genres = Self::list_all(conn).await?;
        Ok(GenreIndex::new(&genres).descendant_ids(id))
    }

    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: &str,
    ) -> Result<Option<Genre>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM genres WHERE id = ?1");
        sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn exists(conn: &mut SqliteConnection, id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM genres WHERE id = ?1)")
            .bind(id)
            .fetch_one(conn)
            .await
    }

    /// Insert a new genre, returning the created row.
    pub async fn create(
        conn: &mut SqliteConnection,
        input: &CreateGenre,
    ) -> Result<Genre, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO genres
                (id, name, parent_id, level, sort_order, description, era_prompt, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Genre>(&query)
            .bind(&input.id)
            .bind(&input.name)
            .bind(&input.parent_id)
            .bind(input.level)
            .bind(input.sort_order)
            .bind(&input.description)
            .bind(&input.era_prompt)
            .bind(now)
            .fetch_one(conn)
            .await
    }

    /// Update a genre. Only supplied fields are applied; a supplied `null`
    /// clears `parent_id`, `description` or `era_prompt`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut SqliteConnection,
        id: &str,
        input: &UpdateGenre,
    ) -> Result<Option<Genre>, sqlx::Error> {
        let query = format!(
            "UPDATE genres SET
                name = COALESCE(?2, name),
                parent_id = CASE WHEN ?3 THEN ?4 ELSE parent_id END,
                level = COALESCE(?5, level),
                sort_order = COALESCE(?6, sort_order),
                description = CASE WHEN ?7 THEN ?8 ELSE description END,
                era_prompt = CASE WHEN ?9 THEN ?10 ELSE era_prompt END,
                updated_at = ?11
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.parent_id.is_some())
            .bind(input.parent_id.as_ref().and_then(Option::as_deref))
            .bind(input.level)
            .bind(input.sort_order)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(Option::as_deref))
            .bind(input.era_prompt.is_some())
            .bind(input.era_prompt.as_ref().and_then(Option::as_deref))
            .bind(Utc::now())
            .fetch_optional(conn)
            .await
    }

    /// Delete a genre and, through the foreign key cascade, its subtree.
    /// Styles in the subtree keep existing with `genre_id` set to null.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(conn: &mut SqliteConnection, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM genres WHERE id = ?1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
