//! Route definitions for the `/achievements` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::achievements;
use crate::state::AppState;

/// Routes mounted at `/achievements` (all require auth).
///
/// ```text
/// GET  /stats         -> get_stats
/// POST /update-stats  -> update_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(achievements::get_stats))
        .route("/update-stats", post(achievements::update_stats))
}
