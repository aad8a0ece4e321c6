//! Handlers for the `/stories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use safequest_core::story::{strip_illustrations_for_update, strip_old_illustrations};
use safequest_core::types::DbId;
use safequest_db::models::story::{CreateStory, Story, UpdateStory};
use safequest_db::repositories::StoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::state::AppState;

/// POST /api/stories
///
/// Persist a finished or in-progress run. Illustrations are large base64
/// data URLs, so every step except the last is stripped before storage.
pub async fn create_story(
    user: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateStory>,
) -> AppResult<(StatusCode, Json<Story>)> {
    strip_old_illustrations(&mut input.full_story);

    let story = StoryRepo::create(
        &state.pool,
        user.user_id,
        input.character.as_ref(),
        &input.initial_interests,
        &input.full_story,
        input.final_score,
        input.is_complete,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(story)))
}

/// GET /api/stories
///
/// The caller's stories, newest first.
pub async fn list_stories(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Story>>> {
    let stories = StoryRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(stories))
}

/// PUT /api/stories/:id
///
/// Update progress on an owned story. Stripping here is conditional: only
/// when more than one step carries an image, so continuing a story does not
/// lose its sole illustration.
pub async fn update_story(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateStory>,
) -> AppResult<Json<Story>> {
    strip_illustrations_for_update(&mut input.full_story);

    let story = StoryRepo::update_progress(
        &state.pool,
        id,
        user.user_id,
        &input.full_story,
        input.final_score,
        input.is_complete,
    )
    .await?
    .ok_or(AppError::NotFound("Story not found or user not authorized."))?;

    Ok(Json(story))
}
