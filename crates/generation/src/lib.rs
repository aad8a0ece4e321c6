//! Upstream AI clients and the story generation service.
//!
//! Two collaborator APIs are consumed: an OpenAI-compatible chat
//! completion endpoint (Groq) and a text-to-image inference endpoint
//! (Hugging Face, Stable Diffusion XL). Both sit behind trait seams
//! ([`chat::ChatModel`], [`image::ImageModel`]) so the service layer and
//! its callers can be tested without the network.
//!
//! One attempt per call site: no caching, no deduplication, no retries.

pub mod chat;
pub mod config;
pub mod error;
pub mod image;
pub mod service;

pub use chat::{ChatMessage, ChatModel, GroqClient};
pub use config::GenerationConfig;
pub use error::GenerationError;
pub use image::{HuggingFaceClient, ImageModel};
pub use service::{GeneratedStory, StoryGenerator};
