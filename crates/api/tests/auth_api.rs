//! HTTP-level integration tests for the auth endpoints.
//!
//! Tests cover signup validation and duplicate handling, login by email or
//! username, the shared "Invalid credentials" response, and credential
//! enforcement on the profile route.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, get_auth, post_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sign up a user via the API and return the response JSON.
async fn signup(app: Router, username: &str, email: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({
        "username": username,
        "email": email,
        "password": password,
        "confirmPassword": password,
    });
    let response = post_json(app, "/api/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

/// Successful signup returns a token and public user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_success(pool: PgPool) {
    let app = common::build_test_app(pool);

    let json = signup(app.clone(), "explorer", "explorer@test.com", "hunter22").await;

    assert!(json["token"].is_string(), "response must contain token");
    assert_eq!(json["user"]["username"], "explorer");
    assert_eq!(json["user"]["email"], "explorer@test.com");

    // The returned token works on the protected profile route.
    let token = json["token"].as_str().unwrap();
    let response = get_auth(app, "/api/auth/user", token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Any missing field yields the fixed validation message.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_missing_fields(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "explorer", "password": "hunter22" });
    let response = post_json(app, "/api/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["msg"], "Please enter all fields");
}

/// An empty string counts as a missing field.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_empty_field_is_missing(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "explorer",
        "email": "",
        "password": "hunter22",
        "confirmPassword": "hunter22",
    });
    let response = post_json(app, "/api/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["msg"], "Please enter all fields");
}

/// Mismatched password confirmation is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_password_mismatch(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "explorer",
        "email": "explorer@test.com",
        "password": "hunter22",
        "confirmPassword": "hunter23",
    });
    let response = post_json(app, "/api/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["msg"], "Passwords don't match");
}

/// Duplicate email is reported with its own message, case-insensitively.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_duplicate_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    signup(app.clone(), "first", "shared@test.com", "hunter22").await;

    let body = serde_json::json!({
        "username": "second",
        "email": "Shared@Test.com",
        "password": "hunter22",
        "confirmPassword": "hunter22",
    });
    let response = post_json(app, "/api/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["msg"], "User with this email already exists");
}

/// Duplicate username is reported with its own message.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_duplicate_username(pool: PgPool) {
    let app = common::build_test_app(pool);
    signup(app.clone(), "taken", "first@test.com", "hunter22").await;

    let body = serde_json::json!({
        "username": "taken",
        "email": "second@test.com",
        "password": "hunter22",
        "confirmPassword": "hunter22",
    });
    let response = post_json(app, "/api/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["msg"], "Username already taken");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Login by username succeeds.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_with_username(pool: PgPool) {
    let app = common::build_test_app(pool);
    signup(app.clone(), "maya", "maya@test.com", "hunter22").await;

    let body = serde_json::json!({ "emailOrUsername": "maya", "password": "hunter22" });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["user"]["username"], "maya");
}

/// An identity containing '@' is looked up as an email.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_with_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    signup(app.clone(), "maya", "maya@test.com", "hunter22").await;

    let body = serde_json::json!({ "emailOrUsername": "maya@test.com", "password": "hunter22" });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
}

/// Unknown identity and wrong password produce identical responses, so a
/// caller cannot probe which accounts exist.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_invalid_credentials_indistinguishable(pool: PgPool) {
    let app = common::build_test_app(pool);
    signup(app.clone(), "maya", "maya@test.com", "hunter22").await;

    let wrong_password = post_json(
        app.clone(),
        "/api/auth/login",
        serde_json::json!({ "emailOrUsername": "maya", "password": "incorrect" }),
    )
    .await;
    let unknown_user = post_json(
        app,
        "/api/auth/login",
        serde_json::json!({ "emailOrUsername": "nobody", "password": "hunter22" }),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
    assert_eq!(unknown_user.status(), StatusCode::BAD_REQUEST);

    let a = body_json(wrong_password).await;
    let b = body_json(unknown_user).await;
    assert_eq!(a, b);
    assert_eq!(a["msg"], "Invalid credentials");
}

/// Missing login fields are rejected with the shared validation message.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_missing_fields(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/auth/login",
        serde_json::json!({ "emailOrUsername": "maya" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["msg"], "Please enter all fields");
}

/// The first login starts a login streak of 1.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_starts_streak(pool: PgPool) {
    let app = common::build_test_app(pool);
    signup(app.clone(), "maya", "maya@test.com", "hunter22").await;

    let login = post_json(
        app.clone(),
        "/api/auth/login",
        serde_json::json!({ "emailOrUsername": "maya", "password": "hunter22" }),
    )
    .await;
    let token = body_json(login).await["token"].as_str().unwrap().to_string();

    let profile = body_json(get_auth(app, "/api/auth/user", &token).await).await;
    assert_eq!(profile["stats"]["loginStreak"], 1);
    assert!(profile["stats"]["lastLoginDate"].is_string());
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// A missing credential header yields 401 with the fixed message.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app, "/api/auth/user").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["msg"], "No token, authorization denied");
}

/// A garbage credential yields 400 with the fixed message.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_rejects_invalid_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/auth/user", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["msg"], "Token is not valid");
}

/// The profile carries stats but never the password hash.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_shape(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = signup(app.clone(), "maya", "maya@test.com", "hunter22").await;
    let token = json["token"].as_str().unwrap();

    let profile = body_json(get_auth(app, "/api/auth/user", token).await).await;

    assert_eq!(profile["username"], "maya");
    assert_eq!(profile["stats"]["storiesCompleted"], 0);
    assert_eq!(profile["stats"]["achievements"], serde_json::json!([]));
    assert!(profile.get("password").is_none());
    assert!(profile.get("passwordHash").is_none());
}
