//! Handlers for the `/auth` resource (signup, login, current user).

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use safequest_core::achievements::updated_login_streak;
use safequest_core::error::CoreError;
use safequest_db::models::user::{CreateUser, UserInfo, UserProfile};
use safequest_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
///
/// Fields are optional so the handler, not the deserializer, can reject
/// missing fields with the expected message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email_or_username: Option<String>,
    pub password: Option<String>,
}

/// Successful authentication response returned by signup and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Treat absent and empty-string fields the same way.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/signup
///
/// Create an account and return a signed credential. Duplicate email is
/// reported before duplicate username.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (Some(username), Some(email), Some(password), Some(confirm_password)) = (
        present(&input.username),
        present(&input.email),
        present(&input.password),
        present(&input.confirm_password),
    ) else {
        return Err(AppError::BadRequest("Please enter all fields".into()));
    };

    if password != confirm_password {
        return Err(AppError::BadRequest("Passwords don't match".into()));
    }

    // Emails are stored and compared lowercase.
    let email = email.to_lowercase();

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::BadRequest(
            "User with this email already exists".into(),
        ));
    }
    if UserRepo::find_by_username(&state.pool, username)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest("Username already taken".into()));
    }

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            email,
            password_hash,
        },
    )
    .await?;

    let token = generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, username = %user.username, "New user signed up");

    Ok(Json(AuthResponse {
        token,
        user: UserInfo::from(&user),
    }))
}

/// POST /api/auth/login
///
/// Authenticate with email or username plus password. Unknown identity and
/// wrong password produce the identical "Invalid credentials" response.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (Some(email_or_username), Some(password)) =
        (present(&input.email_or_username), present(&input.password))
    else {
        return Err(AppError::BadRequest("Please enter all fields".into()));
    };

    // An '@' anywhere marks the identity as an email.
    let user = if email_or_username.contains('@') {
        UserRepo::find_by_email(&state.pool, &email_or_username.to_lowercase()).await?
    } else {
        UserRepo::find_by_username(&state.pool, email_or_username).await?
    };

    let user = user.ok_or(AppError::Core(CoreError::InvalidCredentials))?;

    let matches = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !matches {
        return Err(AppError::Core(CoreError::InvalidCredentials));
    }

    let now = Utc::now();
    let streak = updated_login_streak(user.last_login_date, user.login_streak, now);
    UserRepo::record_login(&state.pool, user.id, now, streak).await?;

    let token = generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, username = %user.username, "User logged in");

    Ok(Json(AuthResponse {
        token,
        user: UserInfo::from(&user),
    }))
}

/// GET /api/auth/user
///
/// The caller's profile, without the password hash.
pub async fn current_user(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UserProfile>> {
    let user = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;

    Ok(Json(UserProfile::from(&user)))
}
