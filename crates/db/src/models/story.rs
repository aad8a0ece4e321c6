//! Story entity model and DTOs.

use safequest_core::story::{CharacterSnapshot, StoryStep};
use safequest_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Full story row from the `stories` table.
///
/// `character` and `full_story` are JSONB columns carrying the document
/// shapes from [`safequest_core::story`].
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: DbId,
    pub user_id: DbId,
    pub character: Option<Json<CharacterSnapshot>>,
    pub initial_interests: Vec<String>,
    pub full_story: Json<Vec<StoryStep>>,
    pub final_score: i32,
    pub is_complete: bool,
    pub created_at: Timestamp,
}

/// Request body for `POST /api/stories`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStory {
    #[serde(default)]
    pub initial_interests: Vec<String>,
    pub character: Option<CharacterSnapshot>,
    #[serde(default)]
    pub full_story: Vec<StoryStep>,
    #[serde(default)]
    pub final_score: i32,
    #[serde(default)]
    pub is_complete: bool,
}

/// Request body for `PUT /api/stories/:id`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStory {
    pub full_story: Vec<StoryStep>,
    #[serde(default)]
    pub final_score: i32,
    #[serde(default)]
    pub is_complete: bool,
}
