pub mod achievements;
pub mod auth;
pub mod blogposts;
pub mod chat;
pub mod generation;
pub mod health;
pub mod stories;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                 signup (public)
/// /auth/login                  login (public)
/// /auth/user                   caller profile (requires auth)
///
/// /generate-story              next story segment (public)
/// /chat                        companion chatbot (requires auth)
///
/// /stories                     create, list own (requires auth)
/// /stories/{id}                update progress (requires auth)
///
/// /blogposts                   list all by popularity, create
/// /blogposts/me                list own
/// /blogposts/{id}              get, update, delete
/// /blogposts/{id}/like         toggle like (PUT)
/// /blogposts/{id}/comment      add comment (POST)
///
/// /achievements/stats          caller stats (GET)
/// /achievements/update-stats   apply run report (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(generation::router())
        .merge(chat::router())
        .nest("/stories", stories::router())
        .nest("/blogposts", blogposts::router())
        .nest("/achievements", achievements::router())
}
