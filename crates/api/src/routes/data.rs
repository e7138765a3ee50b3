use axum::routing::{get, post};
use axum::Router;

use crate::handlers::data;
use crate::state::AppState;

/// Bulk transfer routes mounted at `/data`.
///
/// ```text
/// GET    /export   -> export_data
/// POST   /import   -> import_data
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/export", get(data::export_data))
        .route("/import", post(data::import_data))
}
