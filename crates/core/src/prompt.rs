//! Prompt construction for story generation, image generation, and chat.
//!
//! The "engine" is deliberately textual: prompts instruct the language
//! model (no schema is enforced on its reply) to produce a narrative plus
//! exactly three choices with fixed point values.

use crate::story::StoryStep;

/// Chat-completion model used for both story generation and the chatbot.
pub const STORY_MODEL: &str = "llama-3.3-70b-versatile";

/// Image model used for story illustrations (Stable Diffusion XL).
pub const IMAGE_MODEL: &str = "stabilityai/stable-diffusion-xl-base-1.0";

/// Requested illustration width (16:9 widescreen).
pub const IMAGE_WIDTH: u32 = 1024;
/// Requested illustration height.
pub const IMAGE_HEIGHT: u32 = 576;

/// Maximum length of the scenario excerpt embedded in an image prompt.
const SCENARIO_MAX_CHARS: usize = 150;

/// System persona for the support chatbot.
pub const CHAT_SYSTEM_PROMPT: &str = "You are SafeQuest Bot, a friendly and helpful assistant \
    for the SafeQuest application. You should be supportive, encouraging, and always keep your \
    responses age-appropriate for 10-14 year olds. Do not give safety advice that should come \
    from a parent or guardian, but you can talk about the safety themes in the stories in a \
    general way. Keep your answers concise.";

/// Map a character trait to its storytelling voice descriptor.
///
/// Unknown traits (e.g. "Harmony") fall back to the calm voice.
pub fn voice_descriptor(trait_name: &str) -> &'static str {
    match trait_name {
        "Courage" => "brave and encouraging",
        "Wisdom" => "thoughtful and protective",
        "Creativity" => "inventive and curious",
        _ => "calm and observant",
    }
}

/// Shared tail instructing the JSON output contract.
const FORMAT_INSTRUCTION: &str = "Format as JSON with \"story\" and \"choices\" properties. \
    Each choice needs \"text\", \"safe\" (boolean), and \"points\" (number: safe=+10, neutral=0, unsafe=-5).";

/// Build the story-generation prompt.
///
/// With no prior `decisions` this asks for the beginning of an adventure;
/// otherwise prior steps are serialized as `Story: ...\nMy Choice: ...`
/// pairs and the model is asked to continue. Callers are expected to pass
/// only the most recent steps (the session keeps a three-step window).
pub fn story_prompt(
    interests: &[String],
    character_name: &str,
    character_trait: &str,
    decisions: &[StoryStep],
) -> String {
    let voice = voice_descriptor(character_trait);
    let topics = interests.join(", ");

    if decisions.is_empty() {
        format!(
            "Create the beginning of a safe, age-appropriate adventure for a 10-14 year old \
             with {character_name} ({character_trait}) as their guide. The adventure is about {topics}.\n\
             Write in {character_name}'s voice ({voice}).\n\
             The adventure should end with a clear safety-related decision point with exactly 3 choices. \
             {FORMAT_INSTRUCTION}"
        )
    } else {
        let previous_context = decisions
            .iter()
            .map(|step| {
                let decision = step
                    .decision
                    .as_ref()
                    .map(|d| d.text.as_str())
                    .unwrap_or_default();
                format!("Story: {}\nMy Choice: {}", step.story, decision)
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            "Continue this safe, age-appropriate adventure for a 10-14 year old with \
             {character_name} ({character_trait}) as their guide. The story is about {topics}.\n\
             Previous story:\n{previous_context}\n\
             Continue the adventure in {character_name}'s storytelling voice ({voice}).\n\
             End with a clear safety-related decision point with exactly 3 choices. \
             {FORMAT_INSTRUCTION}"
        )
    }
}

/// Derive a short scenario excerpt from narrative text for image prompts.
///
/// Takes the first two sentence-delimited clauses (split on `.`, `!`, `?`),
/// joined with ". " and truncated to 150 characters so the image prompt
/// stays within upstream limits.
pub fn extract_scenario(story_text: &str) -> String {
    let scenario = story_text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(2)
        .collect::<Vec<_>>()
        .join(". ");

    scenario.chars().take(SCENARIO_MAX_CHARS).collect()
}

/// Build the text-to-image prompt for a story illustration.
///
/// The template explicitly excludes people/characters and any text or
/// watermarks: the image is a background scene only.
pub fn image_prompt(character_name: &str, story_text: &str, interests: &[String]) -> String {
    let scenario = extract_scenario(story_text);
    format!(
        "Beautiful, high-quality digital painting of a background scene for a children's story \
         about {character_name}. Scene: {scenario}. Style: cinematic, vibrant, colorful, high \
         detail, enchanting, friendly cartoon, animated, safe and age-appropriate. Setting \
         involves: {}. Do not show any people or characters, only the background scenery. \
         No text, words, or watermarks in the image.",
        interests.join(", ")
    )
}
