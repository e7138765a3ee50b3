pub mod data;
pub mod folder;
pub mod genre;
pub mod health;
pub mod style;
pub mod tags;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                    service health (also at root)
///
/// /genres                                    tree, create
/// /genres/{id}                               get, update, delete
///
/// /styles                                    list (filters + paging), create
/// /styles/{id}                               get, update, delete
/// /styles/{id}/copy                          increment copy count
///
/// /folders                                   list, create
/// /folders/{id}                              get, update, delete
/// /folders/{id}/styles                       add style
/// /folders/{id}/styles/{style_id}            remove style
///
/// /tags/hot                                  most-copied tags
/// /tags/copy                                 record tag copies
///
/// /data/export                               export document
/// /data/import                               import document (?mode=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/genres", genre::router())
        .nest("/styles", style::router())
        .nest("/folders", folder::router())
        .nest("/tags", tags::router())
        .nest("/data", data::router())
}
