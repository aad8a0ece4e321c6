//! Handlers for the `/blogposts` resource.
//!
//! Reads are open to any authenticated user; writes are owner-scoped.
//! The owner-scoped 404 message is shared between "does not exist" and
//! "owned by someone else" so callers cannot probe other users' posts.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use safequest_core::types::DbId;
use safequest_db::models::blog_post::{
    BlogComment, BlogPost, CreateBlogPost, CreateComment, UpdateBlogPost,
};
use safequest_db::repositories::{BlogPostRepo, UserRepo};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::state::AppState;

/// 404 message for owner-scoped lookups.
const POST_NOT_FOUND_OWNED: &str = "Blog post not found or user not authorized.";
/// 404 message for open lookups (like, comment).
const POST_NOT_FOUND: &str = "Blog post not found.";

/// GET /api/blogposts
///
/// Every post, most liked first.
pub async fn list_posts(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BlogPost>>> {
    let posts = BlogPostRepo::list_by_popularity(&state.pool).await?;
    Ok(Json(posts))
}

/// GET /api/blogposts/me
///
/// The caller's own posts, newest first.
pub async fn list_my_posts(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BlogPost>>> {
    let posts = BlogPostRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(posts))
}

/// POST /api/blogposts
pub async fn create_post(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateBlogPost>,
) -> AppResult<(StatusCode, Json<BlogPost>)> {
    let title = input.title.as_deref().filter(|t| !t.is_empty());
    let content = input.content.as_deref().filter(|c| !c.is_empty());
    let (Some(title), Some(content)) = (title, content) else {
        return Err(AppError::BadRequest("Title and content are required.".into()));
    };

    let post = BlogPostRepo::create(&state.pool, user.user_id, title, content).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/blogposts/:id
pub async fn get_post(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<BlogPost>> {
    let post = BlogPostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound(POST_NOT_FOUND_OWNED))?;
    Ok(Json(post))
}

/// PUT /api/blogposts/:id
///
/// Partial update: absent fields keep their current value.
pub async fn update_post(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBlogPost>,
) -> AppResult<Json<BlogPost>> {
    let post = BlogPostRepo::update_owned(
        &state.pool,
        id,
        user.user_id,
        input.title.as_deref().filter(|t| !t.is_empty()),
        input.content.as_deref().filter(|c| !c.is_empty()),
    )
    .await?
    .ok_or(AppError::NotFound(POST_NOT_FOUND_OWNED))?;

    Ok(Json(post))
}

/// DELETE /api/blogposts/:id
pub async fn delete_post(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let deleted = BlogPostRepo::delete_owned(&state.pool, id, user.user_id).await?;
    if !deleted {
        return Err(AppError::NotFound(POST_NOT_FOUND_OWNED));
    }
    Ok(Json(json!({ "msg": "Blog post deleted successfully." })))
}

/// PUT /api/blogposts/:id/like
///
/// Toggle the caller's like. Two calls in a row cancel out.
pub async fn toggle_like(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<BlogPost>> {
    let post = BlogPostRepo::toggle_like(&state.pool, id, user.user_id)
        .await?
        .ok_or(AppError::NotFound(POST_NOT_FOUND))?;
    Ok(Json(post))
}

/// POST /api/blogposts/:id/comment
///
/// Prepend a comment carrying the caller's denormalized email.
pub async fn add_comment(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<Json<BlogPost>> {
    let author = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;

    let comment = BlogComment {
        user_id: user.user_id,
        user_email: author.email,
        text: input.text,
        date: Utc::now(),
    };

    let post = BlogPostRepo::add_comment(&state.pool, id, &comment)
        .await?
        .ok_or(AppError::NotFound(POST_NOT_FOUND))?;
    Ok(Json(post))
}
