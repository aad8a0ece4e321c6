#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use safequest_api::auth::jwt::{generate_token, JwtConfig, AUTH_HEADER};
use safequest_api::config::ServerConfig;
use safequest_api::routes;
use safequest_api::state::AppState;
use safequest_core::types::DbId;
use safequest_generation::{
    ChatMessage, ChatModel, GenerationError, ImageModel, StoryGenerator,
};

/// Canned model reply for story generation (json_mode requests).
pub const STUB_STORY_REPLY: &str = r#"{
    "story": "You and Max arrive at the edge of the glowing forest. A narrow path splits in three directions.",
    "choices": [
        {"text": "Ask Max which path looks safest", "safe": true, "points": 10},
        {"text": "Wait and watch the paths for a while", "safe": false, "points": 0},
        {"text": "Run down the darkest path alone", "safe": false, "points": -5}
    ]
}"#;

/// Canned assistant reply for plain chat requests.
pub const STUB_CHAT_REPLY: &str = "Great question! Staying with a trusted guide is always a good idea.";

/// Chat stub: JSON-mode requests get the canned story, plain requests get
/// the canned chat reply.
pub struct StubChat;

#[async_trait]
impl ChatModel for StubChat {
    async fn complete(
        &self,
        _messages: &[ChatMessage],
        json_mode: bool,
    ) -> Result<ChatMessage, GenerationError> {
        let content = if json_mode {
            STUB_STORY_REPLY
        } else {
            STUB_CHAT_REPLY
        };
        Ok(ChatMessage {
            role: "assistant".to_string(),
            content: content.to_string(),
        })
    }
}

/// Chat stub that always fails, for upstream-error tests.
pub struct FailingChat;

#[async_trait]
impl ChatModel for FailingChat {
    async fn complete(
        &self,
        _messages: &[ChatMessage],
        _json_mode: bool,
    ) -> Result<ChatMessage, GenerationError> {
        Err(GenerationError::Upstream {
            status: 503,
            body: "service unavailable".to_string(),
        })
    }
}

/// Image stub that always fails, so generated stories carry a null
/// illustration without hitting the network.
pub struct FailingImage;

#[async_trait]
impl ImageModel for FailingImage {
    async fn generate(
        &self,
        _prompt: &str,
        _width: u32,
        _height: u32,
    ) -> Result<String, GenerationError> {
        Err(GenerationError::MissingApiKey("Hugging Face"))
    }
}

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: test_jwt_config(),
    }
}

/// JWT config shared by the test app and token helpers.
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        expiry_days: 1,
    }
}

/// Generate a valid credential for `user_id` against the test secret.
pub fn auth_token(user_id: DbId) -> String {
    generate_token(user_id, &test_jwt_config()).expect("token generation should succeed")
}

/// Build the full application router with all middleware layers, using the
/// given database pool and the default (succeeding) chat stub.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_chat(pool, Arc::new(StubChat))
}

/// Like [`build_test_app`], but with a caller-supplied chat model.
pub fn build_test_app_with_chat(pool: PgPool, chat: Arc<dyn ChatModel>) -> Router {
    let config = test_config();

    let story_generator = Arc::new(StoryGenerator::new(
        Arc::clone(&chat),
        Arc::new(FailingImage),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config),
        story_generator,
        chat_model: chat,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:3000".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(AUTH_HEADER)]);

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without credentials.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// Send a GET request with a credential header.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTH_HEADER, token)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// Send a DELETE request with a credential header.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTH_HEADER, token)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// Send a JSON POST request without credentials.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// Send a JSON POST request with a credential header.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTH_HEADER, token)
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// Send a JSON PUT request with a credential header.
pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTH_HEADER, token)
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
