//! Handlers for the `/achievements` resource.

use axum::extract::State;
use axum::Json;
use safequest_core::achievements::{StatsReport, UserStats};
use safequest_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /api/achievements/stats
pub async fn get_stats(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserStats>> {
    let user = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;
    Ok(Json(user.stats()))
}

/// POST /api/achievements/update-stats
///
/// Apply a finished run's report and return the updated stats. The rule
/// table only ever adds achievement tags, so the set never shrinks.
pub async fn update_stats(
    user: AuthUser,
    State(state): State<AppState>,
    Json(report): Json<StatsReport>,
) -> AppResult<Json<UserStats>> {
    let row = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;

    let mut stats = row.stats();
    stats.record_story(report);

    let updated = UserRepo::update_stats(&state.pool, user.user_id, &stats)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;

    Ok(Json(updated.stats()))
}
