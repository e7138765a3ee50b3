//! Connection setup against an on-disk database.

use promptbox_db::repositories::GenreRepo;

#[tokio::test]
async fn create_pool_makes_parent_directory_and_enables_foreign_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("catalog.db");
    let url = format!("sqlite://{}", path.display());

    let pool = promptbox_db::create_pool(&url).await.unwrap();
    promptbox_db::run_migrations(&pool).await.unwrap();
    promptbox_db::health_check(&pool).await.unwrap();
    assert!(path.exists());

    let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(enabled, 1);

    let mut conn = pool.acquire().await.unwrap();
    assert!(GenreRepo::list_all(&mut conn).await.unwrap().is_empty());

    pool.close().await;
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let pool = promptbox_db::connect_in_memory().await.unwrap();
    promptbox_db::run_migrations(&pool).await.unwrap();
    promptbox_db::run_migrations(&pool).await.unwrap();
}
