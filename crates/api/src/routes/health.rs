//! Liveness probe for the catalog service.
//!
//! Mounted twice: at the root (`/health`) for process supervisors and inside
//! `/api` for the browser client, which only talks to the `/api` prefix.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`. `status` is `"degraded"` while SQLite is unreachable.
#[derive(Debug, Serialize)]
pub struct CatalogHealth {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl CatalogHealth {
    fn new(db_healthy: bool) -> Self {
        Self {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

async fn catalog_health(State(state): State<AppState>) -> Json<CatalogHealth> {
    let db_healthy = match promptbox_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Catalog database unreachable");
            false
        }
    };
    Json(CatalogHealth::new(db_healthy))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(catalog_health))
}
