//! Blog post entity model, embedded comments, and DTOs.

use safequest_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Comment embedded in a blog post's `comments` JSONB column.
///
/// Carries the commenting user's email denormalized so the post can be
/// rendered without a join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogComment {
    pub user_id: DbId,
    pub user_email: String,
    pub text: String,
    pub date: Timestamp,
}

/// Full blog post row from the `blog_posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    /// Ids of users who currently like the post (toggle membership).
    pub likes: Vec<DbId>,
    /// Most recent comment first.
    pub comments: Json<Vec<BlogComment>>,
    pub created_at: Timestamp,
}

/// Request body for `POST /api/blogposts`.
#[derive(Debug, Deserialize)]
pub struct CreateBlogPost {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Request body for `PUT /api/blogposts/:id`. Both fields optional.
#[derive(Debug, Deserialize)]
pub struct UpdateBlogPost {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Request body for `POST /api/blogposts/:id/comment`.
#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub text: String,
}
