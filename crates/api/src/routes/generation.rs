//! Route definition for story generation.

use axum::routing::post;
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// `POST /generate-story` (public).
pub fn router() -> Router<AppState> {
    Router::new().route("/generate-story", post(generation::generate_story))
}
