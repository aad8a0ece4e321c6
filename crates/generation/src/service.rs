//! The story generation service.
//!
//! Combines one chat completion (narrative + choices) with one image
//! inference (illustration). Image failure is never fatal: the story is
//! returned with a null illustration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use safequest_core::prompt::{image_prompt, story_prompt, IMAGE_HEIGHT, IMAGE_WIDTH};
use safequest_core::story::{CharacterSnapshot, Choice, StoryStep};

use crate::chat::{ChatMessage, ChatModel};
use crate::error::GenerationError;
use crate::image::ImageModel;

/// Next narrative segment: story text, the three labeled choices, and an
/// optional illustration.
///
/// `imageUrl` is serialized even when null, per the wire contract.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedStory {
    pub story: String,
    pub choices: Vec<Choice>,
    pub image_url: Option<String>,
}

/// The model's JSON reply. Instructed by prompt text only; no schema is
/// enforced upstream, so parsing stays lenient.
#[derive(Debug, Deserialize)]
struct ModelStory {
    story: String,
    #[serde(default)]
    choices: Vec<Choice>,
}

/// Produces story segments from the chat and image models.
pub struct StoryGenerator {
    chat: Arc<dyn ChatModel>,
    image: Arc<dyn ImageModel>,
}

impl StoryGenerator {
    pub fn new(chat: Arc<dyn ChatModel>, image: Arc<dyn ImageModel>) -> Self {
        Self { chat, image }
    }

    /// Generate the next narrative segment.
    ///
    /// `decisions` is the (already windowed) prior-step context; empty for
    /// an opening segment. A single attempt is made against each upstream
    /// API. Chat failure propagates; image failure degrades to
    /// `image_url: None`.
    pub async fn generate(
        &self,
        interests: &[String],
        character: &CharacterSnapshot,
        decisions: &[StoryStep],
    ) -> Result<GeneratedStory, GenerationError> {
        let prompt = story_prompt(interests, &character.name, &character.trait_name, decisions);

        let reply = self
            .chat
            .complete(&[ChatMessage::user(prompt)], true)
            .await?;

        let parsed: ModelStory = serde_json::from_str(&reply.content)
            .map_err(|e| GenerationError::InvalidResponse(format!("story JSON: {e}")))?;

        let image_url = match self
            .image
            .generate(
                &image_prompt(&character.name, &parsed.story, interests),
                IMAGE_WIDTH,
                IMAGE_HEIGHT,
            )
            .await
        {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(error = %e, "Image generation failed, continuing without illustration");
                None
            }
        };

        Ok(GeneratedStory {
            story: parsed.story,
            choices: parsed.choices,
            image_url,
        })
    }
}
