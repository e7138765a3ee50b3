use axum::routing::get;
use axum::Router;

use crate::handlers::genre;
use crate::state::AppState;

/// Genre routes mounted at `/genres`.
///
/// ```text
/// GET    /        -> list_genres (tree)
/// POST   /        -> create_genre
/// GET    /{id}    -> get_genre
/// PUT    /{id}    -> update_genre
/// DELETE /{id}    -> delete_genre
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(genre::list_genres).post(genre::create_genre))
        .route(
            "/{id}",
            get(genre::get_genre)
                .put(genre::update_genre)
                .delete(genre::delete_genre),
        )
}
