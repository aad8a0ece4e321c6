//! Repository for the `users` table.

use safequest_core::achievements::UserStats;
use safequest_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, stories_completed, \
                       safe_choices_streak, perfect_stories, achievements, \
                       last_login_date, login_streak, created_at";

/// Provides CRUD and stats operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email. Emails are stored lowercase.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Write the embedded stats object back to the flattened columns.
    pub async fn update_stats(
        pool: &PgPool,
        id: DbId,
        stats: &UserStats,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                stories_completed = $2,
                safe_choices_streak = $3,
                perfect_stories = $4,
                achievements = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(stats.stories_completed)
            .bind(stats.safe_choices_streak)
            .bind(stats.perfect_stories)
            .bind(&stats.achievements)
            .fetch_optional(pool)
            .await
    }

    /// Record a successful login: timestamp plus the consecutive-day streak.
    pub async fn record_login(
        pool: &PgPool,
        id: DbId,
        login_date: Timestamp,
        login_streak: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_date = $2, login_streak = $3 WHERE id = $1")
            .bind(id)
            .bind(login_date)
            .bind(login_streak)
            .execute(pool)
            .await?;
        Ok(())
    }
}
