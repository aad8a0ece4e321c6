use std::sync::Arc;

use safequest_generation::{ChatModel, StoryGenerator};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: safequest_db::DbPool,
    /// Server configuration (JWT secret, CORS, timeouts).
    pub config: Arc<ServerConfig>,
    /// Story generation service (chat + image upstreams).
    pub story_generator: Arc<StoryGenerator>,
    /// Chat completion model used directly by the chatbot endpoint.
    pub chat_model: Arc<dyn ChatModel>,
}
