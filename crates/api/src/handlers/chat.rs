//! Handler for the `/chat` companion chatbot endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use safequest_core::prompt::CHAT_SYSTEM_PROMPT;
use safequest_generation::ChatMessage;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::state::AppState;

/// Fixed user-facing message when the chat upstream fails.
const CHAT_FAILED: &str = "Failed to get a response from the chatbot. Please try again.";

/// Request body for `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// POST /api/chat
///
/// Prepends the fixed bot persona and returns the assistant's reply.
/// An empty history is rejected; note the frontend expects this particular
/// 400 to carry an `error` field rather than `msg`.
pub async fn chat(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ChatRequest>,
) -> AppResult<Response> {
    if input.messages.is_empty() {
        let body = json!({ "error": "Messages are required and should be a non-empty array." });
        return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
    }

    let mut messages = Vec::with_capacity(input.messages.len() + 1);
    messages.push(ChatMessage::system(CHAT_SYSTEM_PROMPT));
    messages.extend(input.messages);

    let reply = state
        .chat_model
        .complete(&messages, false)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Chat completion failed");
            AppError::Upstream(CHAT_FAILED)
        })?;

    Ok(Json(reply).into_response())
}
