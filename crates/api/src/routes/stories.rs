//! Route definitions for the `/stories` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::story;
use crate::state::AppState;

/// Routes mounted at `/stories` (all require auth).
///
/// ```text
/// POST /        -> create_story
/// GET  /        -> list_stories
/// PUT  /{id}    -> update_story
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(story::list_stories).post(story::create_story))
        .route("/{id}", put(story::update_story))
}
