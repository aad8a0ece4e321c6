//! Route definition for the companion chatbot.

use axum::routing::post;
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// `POST /chat` (requires auth).
pub fn router() -> Router<AppState> {
    Router::new().route("/chat", post(chat::chat))
}
