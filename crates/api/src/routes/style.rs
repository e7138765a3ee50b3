use axum::routing::{get, post};
use axum::Router;

use crate::handlers::style;
use crate::state::AppState;

/// Style routes mounted at `/styles`.
///
/// ```text
/// GET    /            -> list_styles
/// POST   /            -> create_style
/// GET    /{id}        -> get_style
/// PUT    /{id}        -> update_style
/// DELETE /{id}        -> delete_style
/// POST   /{id}/copy   -> copy_style
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(style::list_styles).post(style::create_style))
        .route(
            "/{id}",
            get(style::get_style)
                .put(style::update_style)
                .delete(style::delete_style),
        )
        .route("/{id}/copy", post(style::copy_style))
}
