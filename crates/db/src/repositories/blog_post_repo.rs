//! Repository for the `blog_posts` table.
//!
//! Likes are a set of user ids toggled in place; the like count is
//! computed on read (`cardinality(likes)`) rather than stored. Comments
//! are an embedded JSONB array, most recent first.

use safequest_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::blog_post::{BlogComment, BlogPost};

const COLUMNS: &str = "id, user_id, title, content, likes, comments, created_at";

/// Provides CRUD and social operations for blog posts.
pub struct BlogPostRepo;

impl BlogPostRepo {
    /// Insert a new post, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        title: &str,
        content: &str,
    ) -> Result<BlogPost, sqlx::Error> {
        let query = format!(
            "INSERT INTO blog_posts (user_id, title, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(user_id)
            .bind(title)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// List every post, most liked first. The count is computed on read.
    pub async fn list_by_popularity(pool: &PgPool) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM blog_posts ORDER BY cardinality(likes) DESC");
        sqlx::query_as::<_, BlogPost>(&query).fetch_all(pool).await
    }

    /// List one user's posts, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a post by id. Reads are not owner-scoped.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE id = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update title and/or content, owner-scoped. `None` fields keep their
    /// current value.
    pub async fn update_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET
                title = COALESCE($3, title),
                content = COALESCE($4, content)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .bind(user_id)
            .bind(title)
            .bind(content)
            .fetch_optional(pool)
            .await
    }

    /// Delete a post, owner-scoped. Returns `true` if a row was removed.
    pub async fn delete_owned(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Toggle `user_id`'s membership in the likes set.
    ///
    /// Liking twice is an idempotent pair: the second call removes the
    /// first. New likes are prepended. Returns `None` when the post does
    /// not exist.
    pub async fn toggle_like(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let Some(post) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let likes: Vec<DbId> = if post.likes.contains(&user_id) {
            post.likes.into_iter().filter(|l| *l != user_id).collect()
        } else {
            std::iter::once(user_id).chain(post.likes).collect()
        };

        let query = format!(
            "UPDATE blog_posts SET likes = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .bind(&likes)
            .fetch_optional(pool)
            .await
    }

    /// Prepend a comment to the post's embedded comment list.
    ///
    /// Returns `None` when the post does not exist.
    pub async fn add_comment(
        pool: &PgPool,
        id: DbId,
        comment: &BlogComment,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        // An object || an array prepends the object as a single element.
        let query = format!(
            "UPDATE blog_posts SET comments = $2 || comments WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .bind(Json(comment))
            .fetch_optional(pool)
            .await
    }
}
