//! SafeQuest domain types and pure story logic.
//!
//! Everything in this crate is side-effect free: the story session state
//! machine, prompt construction, achievement rules, and the step/choice
//! data model. Persistence lives in `safequest-db`, upstream AI calls in
//! `safequest-generation`, and HTTP in `safequest-api`.

pub mod achievements;
pub mod error;
pub mod prompt;
pub mod session;
pub mod story;
pub mod types;

pub use error::CoreError;
