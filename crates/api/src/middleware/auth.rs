//! Request authentication via the `x-auth-token` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use safequest_core::types::DbId;

use crate::auth::jwt::{self, AUTH_HEADER};
use crate::error::AppError;
use crate::state::AppState;

/// Extractor for the authenticated user on protected routes.
///
/// Reads the `x-auth-token` header and validates it against the configured
/// JWT secret. A missing header yields 401, an invalid or expired token 400,
/// matching the wire contract the frontend expects.
///
/// # Usage
///
/// ```ignore
/// async fn handler(user: AuthUser, State(state): State<AppState>) -> AppResult<...> {
///     let user_id = user.user_id;
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// The authenticated user's database id.
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTH_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::MissingToken)?;

        let claims = jwt::validate_token(token, &state.config.jwt).map_err(|err| {
            tracing::debug!(error = %err, "Token validation failed");
            AppError::InvalidToken
        })?;

        Ok(AuthUser {
            user_id: claims.id,
        })
    }
}
