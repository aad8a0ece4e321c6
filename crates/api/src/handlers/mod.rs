pub mod achievements;
pub mod auth;
pub mod blog;
pub mod chat;
pub mod generation;
pub mod story;
