//! Story step data model and illustration-retention rules.
//!
//! A story is an ordered sequence of [`StoryStep`]s. Each step carries the
//! narrative text, the three choices offered, the decision the player
//! eventually committed (absent until they act), an optional feedback line,
//! and an optional illustration. Illustrations are large base64 data URLs,
//! so only the most recent step keeps one when a story is persisted.

use serde::{Deserialize, Serialize};

/// Point value awarded for a safe choice.
pub const SAFE_POINTS: i32 = 10;
/// Point value for a neutral choice.
pub const NEUTRAL_POINTS: i32 = 0;
/// Point value for an unsafe choice (negative).
pub const UNSAFE_POINTS: i32 = -5;

/// One selectable option at a decision point.
///
/// The same shape doubles as the committed decision on a [`StoryStep`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    pub safe: bool,
    pub points: i32,
}

/// Denormalized character snapshot stored with each story.
///
/// Deliberately a copy rather than a reference: the character catalog is
/// client-side and may change, but a saved story should keep the guide it
/// was told with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Personality trait driving the narration voice (e.g. "Courage").
    #[serde(rename = "trait")]
    pub trait_name: String,
}

/// One narrative segment plus its choices and eventual decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryStep {
    pub story: String,
    pub choices: Vec<Choice>,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub decision: Option<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Drop illustrations from every step except the last.
///
/// Applied unconditionally when a story is first persisted.
pub fn strip_old_illustrations(steps: &mut [StoryStep]) {
    let last = steps.len().saturating_sub(1);
    for step in steps.iter_mut().take(last) {
        step.image_url = None;
    }
}

/// Illustration stripping for story *updates*.
///
/// Only strips when more than one step carries an illustration, i.e. a new
/// illustrated scene has been appended. A resumed story that still has a
/// single illustrated step is left untouched so continuing a story does not
/// lose its current image.
pub fn strip_illustrations_for_update(steps: &mut [StoryStep]) {
    let illustrated = steps.iter().filter(|s| s.image_url.is_some()).count();
    if illustrated > 1 {
        strip_old_illustrations(steps);
    }
}
