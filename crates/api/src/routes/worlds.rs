//! Route definitions for worlds.
//!
//! Mounted at the root by `build_app_router()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::worlds;
use crate::state::AppState;

/// Worlds routes. One path, multiplexed by method and query:
///
/// ```text
/// GET    /                 -> read_worlds (list)
/// GET    /?id={id}         -> read_worlds (fetch payload, count download)
/// GET    /?report={id}     -> read_worlds (count report)
/// POST   /                 -> upload_world
/// PUT    /?id={id}         -> update_world
/// PATCH  /?id={id}         -> update_world
/// DELETE /?id={id}         -> delete_world
/// HEAD   /                 -> method_not_allowed (405, never counts a download)
/// *      /                 -> method_not_allowed (405)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(worlds::read_worlds)
            .head(worlds::method_not_allowed)
            .post(worlds::upload_world)
            .put(worlds::update_world)
            .patch(worlds::update_world)
            .delete(worlds::delete_world)
            .fallback(worlds::method_not_allowed),
    )
}
