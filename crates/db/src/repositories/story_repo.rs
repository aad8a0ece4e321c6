//! Repository for the `stories` table.
//!
//! All mutation paths are owner-scoped: the `user_id` predicate rides on
//! every query so a story owned by another user behaves as if it does not
//! exist.

use safequest_core::story::{CharacterSnapshot, StoryStep};
use safequest_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::story::Story;

/// Column list shared across queries. `character` needs quoting: it is a
/// reserved word in SQL.
const COLUMNS: &str = "id, user_id, \"character\", initial_interests, full_story, \
                       final_score, is_complete, created_at";

/// Provides owner-scoped CRUD for stories.
pub struct StoryRepo;

impl StoryRepo {
    /// Insert a new story for `user_id`, returning the created row.
    ///
    /// Callers are expected to have applied the illustration-retention
    /// rule to `full_story` beforehand.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        character: Option<&CharacterSnapshot>,
        initial_interests: &[String],
        full_story: &[StoryStep],
        final_score: i32,
        is_complete: bool,
    ) -> Result<Story, sqlx::Error> {
        let query = format!(
            "INSERT INTO stories (user_id, \"character\", initial_interests, full_story, final_score, is_complete)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(user_id)
            .bind(character.map(Json))
            .bind(initial_interests)
            .bind(Json(full_story))
            .bind(final_score)
            .bind(is_complete)
            .fetch_one(pool)
            .await
    }

    /// List a user's stories, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Story>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM stories WHERE user_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Story>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a story by id, scoped to its owner.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a story's progress, score, and completion flag, owner-scoped.
    ///
    /// Returns `None` when the story does not exist or belongs to another
    /// user.
    pub async fn update_progress(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        full_story: &[StoryStep],
        final_score: i32,
        is_complete: bool,
    ) -> Result<Option<Story>, sqlx::Error> {
        let query = format!(
            "UPDATE stories SET
                full_story = $3,
                final_score = $4,
                is_complete = $5
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .bind(user_id)
            .bind(Json(full_story))
            .bind(final_score)
            .bind(is_complete)
            .fetch_optional(pool)
            .await
    }
}
