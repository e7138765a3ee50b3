//! Load an export document into the catalog in merge mode.
//!
//! ```text
//! promptbox-seed [path/to/initial_data.json]
//! ```
//!
//! The path falls back to `SEED_FILE`, then `seeds/initial_data.json`.
//! Existing records are never overwritten, so seeding twice is harmless.

use std::path::PathBuf;

use anyhow::Context;
use promptbox_api::config::ServerConfig;
use promptbox_core::transfer::{ImportMode, TransferDocument};
use promptbox_db::repositories::TransferRepo;

const DEFAULT_SEED_FILE: &str = "seeds/initial_data.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "promptbox_seed=info,promptbox_db=info".into()),
        )
        .init();

    let path: PathBuf = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SEED_FILE").ok())
        .unwrap_or_else(|| DEFAULT_SEED_FILE.to_string())
        .into();

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let document: TransferDocument = serde_json::from_str(&raw)
        .with_context(|| format!("Seed file {} is not a valid export document", path.display()))?;
    document.check_version()?;

    let config = ServerConfig::from_env().context("Invalid configuration")?;
    let pool = promptbox_db::create_pool(&config.database_url)
        .await
        .context("Failed to open database")?;
    promptbox_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let mut tx = pool.begin().await?;
    let summary = TransferRepo::import(&mut tx, &document.data, ImportMode::Merge).await?;
    tx.commit().await?;

    tracing::info!(
        file = %path.display(),
        genres = summary.genres_imported,
        styles = summary.styles_imported,
        folders = summary.folders_imported,
        links = summary.links_imported,
        "Seed complete",
    );

    pool.close().await;
    Ok(())
}
