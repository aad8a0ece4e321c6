//! HTTP-level integration tests for the achievements endpoints.
//!
//! Covers default stats, the rule table, streak resets, and the
//! monotonically non-decreasing achievement set.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, get_auth, post_json, post_json_auth};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sign up a user via the API, returning their token.
async fn signup(app: Router, username: &str) -> String {
    let body = serde_json::json!({
        "username": username,
        "email": format!("{username}@test.com"),
        "password": "hunter22",
        "confirmPassword": "hunter22",
    });
    let response = post_json(app, "/api/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Report a finished run via the API and return the updated stats.
async fn report_run(
    app: Router,
    token: &str,
    safe: i32,
    total: i32,
    complete: bool,
) -> serde_json::Value {
    let body = serde_json::json!({
        "safeChoices": safe,
        "totalChoices": total,
        "isComplete": complete,
    });
    let response = post_json_auth(app, "/api/achievements/update-stats", token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

fn has_achievement(stats: &serde_json::Value, tag: &str) -> bool {
    stats["achievements"]
        .as_array()
        .unwrap()
        .iter()
        .any(|a| a == tag)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// A fresh account has zeroed stats and no achievements.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_stats_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup(app.clone(), "rookie").await;

    let stats = body_json(get_auth(app, "/api/achievements/stats", &token).await).await;

    assert_eq!(stats["storiesCompleted"], 0);
    assert_eq!(stats["safeChoicesStreak"], 0);
    assert_eq!(stats["perfectStories"], 0);
    assert_eq!(stats["achievements"], serde_json::json!([]));
}

/// Stats routes require a credential.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_stats_require_auth(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app, "/api/achievements/stats").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// The first completed perfect run earns FIRST_STORY and PERFECT_SCORE.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_first_perfect_run(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup(app.clone(), "hero").await;

    let stats = report_run(app, &token, 5, 5, true).await;

    assert_eq!(stats["storiesCompleted"], 1);
    assert_eq!(stats["perfectStories"], 1);
    assert_eq!(stats["safeChoicesStreak"], 1);
    assert!(has_achievement(&stats, "FIRST_STORY"));
    assert!(has_achievement(&stats, "PERFECT_SCORE"));
    assert!(!has_achievement(&stats, "SAFETY_STREAK"));
    assert!(!has_achievement(&stats, "STORY_MASTER"));
}

/// An imperfect run resets the safe-choice streak to zero.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_imperfect_run_resets_streak(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup(app.clone(), "hero").await;

    report_run(app.clone(), &token, 5, 5, true).await;
    report_run(app.clone(), &token, 5, 5, true).await;
    let stats = report_run(app, &token, 3, 5, true).await;

    assert_eq!(stats["safeChoicesStreak"], 0);
    assert_eq!(stats["storiesCompleted"], 3);
}

/// Five perfect completed runs earn SAFETY_STREAK and STORY_MASTER.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_streak_and_master_thresholds(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup(app.clone(), "hero").await;

    let mut stats = serde_json::Value::Null;
    for _ in 0..5 {
        stats = report_run(app.clone(), &token, 5, 5, true).await;
    }

    assert_eq!(stats["storiesCompleted"], 5);
    assert_eq!(stats["safeChoicesStreak"], 5);
    assert!(has_achievement(&stats, "SAFETY_STREAK"));
    assert!(has_achievement(&stats, "STORY_MASTER"));
}

/// Earned achievements survive later imperfect runs, without duplicates.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_achievements_never_shrink(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup(app.clone(), "hero").await;

    report_run(app.clone(), &token, 5, 5, true).await;
    let stats = report_run(app.clone(), &token, 0, 5, true).await;

    assert!(has_achievement(&stats, "FIRST_STORY"));
    assert!(has_achievement(&stats, "PERFECT_SCORE"));

    let tags = stats["achievements"].as_array().unwrap();
    let perfect_count = tags.iter().filter(|a| **a == "PERFECT_SCORE").count();
    assert_eq!(perfect_count, 1);

    // The persisted stats match the returned ones.
    let fetched = body_json(get_auth(app, "/api/achievements/stats", &token).await).await;
    assert_eq!(fetched["achievements"], stats["achievements"]);
}

/// An incomplete run updates the streak but not the completed count.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_incomplete_run_not_counted(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = signup(app.clone(), "hero").await;

    let stats = report_run(app, &token, 3, 3, false).await;

    assert_eq!(stats["storiesCompleted"], 0);
    assert_eq!(stats["perfectStories"], 1);
    assert!(!has_achievement(&stats, "FIRST_STORY"));
}
