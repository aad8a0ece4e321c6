use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use safequest_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the original wire shape:
/// client errors carry a `msg` field, server errors an `error` field.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `safequest-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No credential header on a protected route.
    #[error("No token, authorization denied")]
    MissingToken,

    /// The credential header carried an invalid or expired token.
    #[error("Token is not valid")]
    InvalidToken,

    /// A bad request with a human-readable message.
    #[error("{0}")]
    BadRequest(String),

    /// A missing resource with the route's specific message.
    #[error("{0}")]
    NotFound(&'static str),

    /// An upstream dependency failed; the message is the route's fixed
    /// user-facing text.
    #[error("{0}")]
    Upstream(&'static str),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // (status, body) pairs; 4xx use "msg", 5xx use "error".
        let (status, body) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    json!({ "msg": format!("{entity} with id {id} not found") }),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, json!({ "msg": msg }))
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "msg": msg })),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, json!({ "msg": msg }))
                }
                // Identical message whether the identity or the password
                // was wrong.
                CoreError::InvalidCredentials => {
                    (StatusCode::BAD_REQUEST, json!({ "msg": "Invalid credentials" }))
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": "Server Error" }),
                    )
                }
            },

            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Server Error" }),
                )
            }

            AppError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                json!({ "msg": "No token, authorization denied" }),
            ),
            AppError::InvalidToken => {
                (StatusCode::BAD_REQUEST, json!({ "msg": "Token is not valid" }))
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "msg": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "msg": msg })),

            AppError::Upstream(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Server Error" }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
