//! Repository for the `tag_stats` table.

use chrono::Utc;
use promptbox_core::tags::normalize_batch;
use sqlx::SqliteConnection;

use crate::models::tag_stat::TagStat;

const COLUMNS: &str = "tag, copy_count, last_copied_at";

pub struct TagStatRepo;

impl TagStatRepo {
    /// The `limit` most-copied tags, ties broken alphabetically.
    pub async fn hot(conn: &mut SqliteConnection, limit: i64) -> Result<Vec<TagStat>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tag_stats
             WHERE copy_count > 0
             ORDER BY copy_count DESC, tag ASC
             LIMIT ?1"
        );
        sqlx::query_as::<_, TagStat>(&query)
            .bind(limit)
            .fetch_all(conn)
            .await
    }

    /// Count one copy for each tag in `tags`.
    ///
    /// Tags are normalized first; blank ones are skipped and repeated ones
    /// count once per occurrence. Returns the number of copies recorded.
    pub async fn record_copies(
        conn: &mut SqliteConnection,
        tags: &[String],
    ) -> Result<u64, sqlx::Error> {
        let now = Utc::now();
        let mut recorded = 0;

        for tag in normalize_batch(tags) {
            sqlx::query(
                "INSERT INTO tag_stats (tag, copy_count, last_copied_at) VALUES (?1, 1, ?2)
                 ON CONFLICT(tag) DO UPDATE SET
                    copy_count = copy_count + 1,
                    last_copied_at = excluded.last_copied_at",
            )
            .bind(&tag)
            .bind(now)
            .execute(&mut *conn)
            .await?;
            recorded += 1;
        }

        Ok(recorded)
    }
}
