//! User entity model and DTOs.

use safequest_core::achievements::UserStats;
use safequest_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserInfo`] or [`UserProfile`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub stories_completed: i32,
    pub safe_choices_streak: i32,
    pub perfect_stories: i32,
    pub achievements: Vec<String>,
    pub last_login_date: Option<Timestamp>,
    pub login_streak: i32,
    pub created_at: Timestamp,
}

impl User {
    /// Assemble the embedded stats object from the flattened columns.
    pub fn stats(&self) -> UserStats {
        UserStats {
            stories_completed: self.stories_completed,
            safe_choices_streak: self.safe_choices_streak,
            perfect_stories: self.perfect_stories,
            achievements: self.achievements.clone(),
            last_login_date: self.last_login_date,
            login_streak: self.login_streak,
        }
    }
}

/// Minimal public user info returned from signup/login.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// Caller profile for `GET /api/auth/user` (everything but the hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub stats: UserStats,
    pub created_at: Timestamp,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            stats: user.stats(),
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
