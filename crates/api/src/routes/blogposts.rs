//! Route definitions for the `/blogposts` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::blog;
use crate::state::AppState;

/// Routes mounted at `/blogposts` (all require auth).
///
/// ```text
/// GET    /               -> list_posts (sorted by like count)
/// POST   /               -> create_post
/// GET    /me             -> list_my_posts
/// GET    /{id}           -> get_post
/// PUT    /{id}           -> update_post (owner only)
/// DELETE /{id}           -> delete_post (owner only)
/// PUT    /{id}/like      -> toggle_like
/// POST   /{id}/comment   -> add_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(blog::list_posts).post(blog::create_post))
        .route("/me", get(blog::list_my_posts))
        .route(
            "/{id}",
            get(blog::get_post)
                .put(blog::update_post)
                .delete(blog::delete_post),
        )
        .route("/{id}/like", put(blog::toggle_like))
        .route("/{id}/comment", post(blog::add_comment))
}
