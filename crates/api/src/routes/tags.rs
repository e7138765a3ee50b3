use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// Tag statistics routes mounted at `/tags`.
///
/// ```text
/// GET    /hot     -> hot_tags
/// POST   /copy    -> record_copies
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/hot", get(tags::hot_tags))
        .route("/copy", post(tags::record_copies))
}
