//! Repository for the `styles` table.
//!
//! Reads go through a view query that joins the genre name and derives
//! `is_favorited` from folder membership.

use chrono::Utc;
use promptbox_core::pagination::PageRequest;
use promptbox_core::tags::encode_tags;
use sqlx::SqliteConnection;

use crate::models::style::{CreateStyle, Style, StyleFilter, StyleRow, UpdateStyle};

/// Select list for [`StyleRow`]. Expects `styles s LEFT JOIN genres g`.
const VIEW_COLUMNS: &str = "s.id, s.name, s.tags_json, s.genre_id, s.description, s.bpm_range, \
     s.audio_type, s.audio_source, s.reference_url, s.copy_count, s.created_at, s.updated_at, \
     g.name AS genre_name, \
     EXISTS(SELECT 1 FROM folder_styles fs WHERE fs.style_id = s.id) AS is_favorited";

const VIEW_FROM: &str = "styles s LEFT JOIN genres g ON g.id = s.genre_id";

/// Provides CRUD, listing and counter operations for styles.
pub struct StyleRepo;

impl StyleRepo {
    /// One page of styles matching `filter`, newest first.
    pub async fn list(
        conn: &mut SqliteConnection,
        filter: &StyleFilter,
        page: PageRequest,
    ) -> Result<Vec<Style>, sqlx::Error> {
        let (where_clause, binds) = build_where(filter);
        let limit_idx = binds.len() + 1;
        let query = format!(
            "SELECT {VIEW_COLUMNS} FROM {VIEW_FROM} {where_clause} \
             ORDER BY s.created_at DESC, s.rowid DESC \
             LIMIT ?{limit_idx} OFFSET ?{offset_idx}",
            offset_idx = limit_idx + 1,
        );

        let mut q = sqlx::query_as::<_, StyleRow>(&query);
        for value in &binds {
            q = q.bind(value);
        }
        let rows = q
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(conn)
            .await?;

        rows.into_iter().map(Style::try_from).collect()
    }

    /// Number of styles matching `filter`.
    pub async fn count(
        conn: &mut SqliteConnection,
        filter: &StyleFilter,
    ) -> Result<i64, sqlx::Error> {
        let (where_clause, binds) = build_where(filter);
        let query = format!("SELECT COUNT(*) FROM styles s {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for value in &binds {
            q = q.bind(value);
        }
        q.fetch_one(conn).await
    }

    /// Every style in the catalog, in creation order.
    ///
    /// Used by export: re-importing inserts rows in this order, which keeps
    /// the newest-first listing intact.
    pub async fn list_all(conn: &mut SqliteConnection) -> Result<Vec<Style>, sqlx::Error> {
        Self::list_where(conn, "", None).await
    }

    /// Styles whose `genre_id` is exactly `genre_id`, in creation order.
    pub async fn list_by_genre(
        conn: &mut SqliteConnection,
        genre_id: &str,
    ) -> Result<Vec<Style>, sqlx::Error> {
        Self::list_where(conn, "WHERE s.genre_id = ?1", Some(genre_id)).await
    }

    /// Styles linked to `folder_id`, in creation order.
    pub async fn list_by_folder(
        conn: &mut SqliteConnection,
        folder_id: &str,
    ) -> Result<Vec<Style>, sqlx::Error> {
        Self::list_where(
            conn,
            "WHERE s.id IN (SELECT style_id FROM folder_styles WHERE folder_id = ?1)",
            Some(folder_id),
        )
        .await
    }

    async fn list_where(
        conn: &mut SqliteConnection,
        where_clause: &str,
        param: Option<&str>,
    ) -> Result<Vec<Style>, sqlx::Error> {
        let query = format!(
            "SELECT {VIEW_COLUMNS} FROM {VIEW_FROM} {where_clause} \
             ORDER BY s.created_at, s.rowid"
        );
        let mut q = sqlx::query_as::<_, StyleRow>(&query);
        if let Some(param) = param {
            q = q.bind(param);
        }
        let rows = q.fetch_all(conn).await?;
        rows.into_iter().map(Style::try_from).collect()
    }

    /// Find a style by id, with its genre name and favorite flag.
    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: &str,
    ) -> Result<Option<Style>, sqlx::Error> {
        let query = format!("SELECT {VIEW_COLUMNS} FROM {VIEW_FROM} WHERE s.id = ?1");
        sqlx::query_as::<_, StyleRow>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .map(Style::try_from)
            .transpose()
    }

    pub async fn exists(conn: &mut SqliteConnection, id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM styles WHERE id = ?1)")
            .bind(id)
            .fetch_one(conn)
            .await
    }

    /// Insert a new style under `id`, returning the created view.
    pub async fn create(
        conn: &mut SqliteConnection,
        id: &str,
        input: &CreateStyle,
    ) -> Result<Style, sqlx::Error> {
        let tags_json = encode_tags(&input.tags).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO styles
                (id, name, tags_json, genre_id, description, bpm_range,
                 audio_type, audio_source, reference_url, copy_count, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, ?10, ?10)",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&tags_json)
        .bind(&input.genre_id)
        .bind(&input.description)
        .bind(&input.bpm_range)
        .bind(input.audio_type.map(|t| t.as_str()))
        .bind(&input.audio_source)
        .bind(&input.reference_url)
        .bind(now)
        .execute(&mut *conn)
        .await?;

        Self::find_by_id(conn, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Update a style. Only supplied fields are applied; a supplied `null`
    /// clears a nullable column.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut SqliteConnection,
        id: &str,
        input: &UpdateStyle,
    ) -> Result<Option<Style>, sqlx::Error> {
        let tags_json = input
            .tags
            .as_deref()
            .map(encode_tags)
            .transpose()
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let audio_type = input.audio_type.map(|t| t.map(|t| t.as_str()));

        let result = sqlx::query(
            "UPDATE styles SET
                name = COALESCE(?2, name),
                tags_json = COALESCE(?3, tags_json),
                genre_id = CASE WHEN ?4 THEN ?5 ELSE genre_id END,
                description = CASE WHEN ?6 THEN ?7 ELSE description END,
                bpm_range = CASE WHEN ?8 THEN ?9 ELSE bpm_range END,
                audio_type = CASE WHEN ?10 THEN ?11 ELSE audio_type END,
                audio_source = CASE WHEN ?12 THEN ?13 ELSE audio_source END,
                reference_url = CASE WHEN ?14 THEN ?15 ELSE reference_url END,
                updated_at = ?16
             WHERE id = ?1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&tags_json)
        .bind(input.genre_id.is_some())
        .bind(input.genre_id.as_ref().and_then(Option::as_deref))
        .bind(input.description.is_some())
        .bind(input.description.as_ref().and_then(Option::as_deref))
        .bind(input.bpm_range.is_some())
        .bind(input.bpm_range.as_ref().and_then(Option::as_deref))
        .bind(audio_type.is_some())
        .bind(audio_type.flatten())
        .bind(input.audio_source.is_some())
        .bind(input.audio_source.as_ref().and_then(Option::as_deref))
        .bind(input.reference_url.is_some())
        .bind(input.reference_url.as_ref().and_then(Option::as_deref))
        .bind(Utc::now())
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(conn, id).await
    }

    /// Delete a style. Folder links are removed by the cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(conn: &mut SqliteConnection, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM styles WHERE id = ?1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Add one to a style's copy counter. Returns `false` if the style is missing.
    pub async fn increment_copy_count(
        conn: &mut SqliteConnection,
        id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE styles SET copy_count = copy_count + 1 WHERE id = ?1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Build the `WHERE` clause for a listing filter, numbering placeholders
/// from `?1`. Returns the clause and the values to bind in order.
fn build_where(filter: &StyleFilter) -> (String, Vec<String>) {
    let mut conditions = Vec::new();
    let mut binds: Vec<String> = Vec::new();

    if let Some(genre_ids) = &filter.genre_ids {
        if genre_ids.is_empty() {
            conditions.push("0".to_string());
        } else {
            let placeholders: Vec<String> = genre_ids
                .iter()
                .map(|id| {
                    binds.push(id.clone());
                    format!("?{}", binds.len())
                })
                .collect();
            conditions.push(format!("s.genre_id IN ({})", placeholders.join(", ")));
        }
    }

    if let Some(term) = filter.search.as_deref().filter(|t| !t.is_empty()) {
        binds.push(like_pattern(term));
        let idx = binds.len();
        conditions.push(format!(
            "(s.name LIKE ?{idx} ESCAPE '\\' \
              OR EXISTS (SELECT 1 FROM json_each(s.tags_json) t \
                         WHERE t.value LIKE ?{idx} ESCAPE '\\') \
              OR s.description LIKE ?{idx} ESCAPE '\\' \
              OR s.bpm_range LIKE ?{idx} ESCAPE '\\')"
        ));
    }

    if let Some(folder_id) = &filter.folder_id {
        binds.push(folder_id.clone());
        conditions.push(format!(
            "s.id IN (SELECT style_id FROM folder_styles WHERE folder_id = ?{})",
            binds.len()
        ));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (where_clause, binds)
}

/// Wrap a search term for `LIKE`, escaping its wildcards.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
