use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::folder;
use crate::state::AppState;

/// Folder routes mounted at `/folders`.
///
/// ```text
/// GET    /                          -> list_folders
/// POST   /                          -> create_folder
/// GET    /{id}                      -> get_folder
/// PUT    /{id}                      -> update_folder
/// DELETE /{id}                      -> delete_folder
/// POST   /{id}/styles               -> add_style
/// DELETE /{id}/styles/{style_id}    -> remove_style
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(folder::list_folders).post(folder::create_folder))
        .route(
            "/{id}",
            get(folder::get_folder)
                .put(folder::update_folder)
                .delete(folder::delete_folder),
        )
        .route("/{id}/styles", post(folder::add_style))
        .route("/{id}/styles/{style_id}", delete(folder::remove_style))
}
