//! Handler for `POST /generate-story`.
//!
//! This route is public in the current frontend contract even though it
//! spends upstream quota. Kept as-is; see DESIGN.md.

use axum::extract::State;
use axum::Json;
use safequest_core::story::{CharacterSnapshot, StoryStep};
use safequest_generation::GeneratedStory;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Fixed user-facing message when the LLM call fails.
const GENERATION_FAILED: &str = "Failed to generate story. Please try again.";

/// Request body for `POST /generate-story`.
#[derive(Debug, Deserialize)]
pub struct GenerateStoryRequest {
    #[serde(default)]
    pub interests: Vec<String>,
    pub character: CharacterSnapshot,
    /// Prior steps with their decisions; empty for an opening segment.
    /// The caller windows this to its context limit.
    #[serde(default)]
    pub decisions: Vec<StoryStep>,
}

/// POST /api/generate-story
///
/// One attempt, no retries. Image failure degrades to a null illustration
/// inside the generator; only a chat failure reaches the error path.
pub async fn generate_story(
    State(state): State<AppState>,
    Json(input): Json<GenerateStoryRequest>,
) -> AppResult<Json<GeneratedStory>> {
    let generated = state
        .story_generator
        .generate(&input.interests, &input.character, &input.decisions)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Story generation failed");
            AppError::Upstream(GENERATION_FAILED)
        })?;

    Ok(Json(generated))
}
