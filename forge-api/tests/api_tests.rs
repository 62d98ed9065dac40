//! HTTP-level tests for the FORGE API router.
//!
//! These tests drive the composed Axum router with in-process requests
//! (no network, no database): the completion provider is mocked and the
//! project store is in-memory. The database client handed to the health
//! routes is lazy and never connects here.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use forge_api::{create_api_router, ApiConfig, DbClient, DbConfig, GenerationService};
use forge_llm::MockCompletionProvider;
use forge_storage::InMemoryProjectStore;

// ============================================================================
// TEST SETUP
// ============================================================================

fn test_app(provider: MockCompletionProvider) -> (Arc<InMemoryProjectStore>, Router) {
    let store = Arc::new(InMemoryProjectStore::new());
    let service = Arc::new(GenerationService::new(Arc::new(provider), store.clone()));
    // Pool creation is lazy; no connection is made unless /health/ready runs.
    let db = DbClient::from_config(&DbConfig::default()).expect("lazy pool");
    let app = create_api_router(service, db, &ApiConfig::default());
    (store, app)
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// GENERATION ENDPOINT
// ============================================================================

#[tokio::test]
async fn test_generate_returns_parsed_files() {
    let raw = r##"{"App.js":"console.log('todo')","README.md":"# Todo"}"##;
    let (_, app) = test_app(MockCompletionProvider::returning(raw));

    let response = app
        .oneshot(post_json(
            "/api/v1/generate",
            r#"{"prompt":"todo list app","user_id":"user-1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["files"]["App.js"], "console.log('todo')");
    assert_eq!(body["files"]["README.md"], "# Todo");
    assert_eq!(body["llm_output"], raw);
}

#[tokio::test]
async fn test_generate_fallback_on_plain_text_output() {
    let raw = "Sure, here's your app: ...";
    let (_, app) = test_app(MockCompletionProvider::returning(raw));

    let response = app
        .oneshot(post_json(
            "/api/v1/generate",
            r#"{"prompt":"todo list app"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["files"]["main.txt"], raw);
    assert!(body["files"]["README.md"]
        .as_str()
        .unwrap()
        .contains("todo list app"));
    assert_eq!(body["llm_output"], raw);
}

#[tokio::test]
async fn test_generate_missing_prompt_is_bad_request() {
    let (store, app) = test_app(MockCompletionProvider::returning("unused"));

    let response = app
        .oneshot(post_json("/api/v1/generate", r#"{"user_id":"user-1"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "MISSING_FIELD");
    assert!(body["message"].as_str().unwrap().contains("prompt"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_generate_blank_prompt_is_bad_request() {
    let (_, app) = test_app(MockCompletionProvider::returning("unused"));

    let response = app
        .oneshot(post_json("/api/v1/generate", r#"{"prompt":"   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_upstream_failure_is_bad_gateway() {
    let provider = MockCompletionProvider::failing(forge_core::LlmError::RequestFailed {
        provider: "openai".to_string(),
        status: 503,
        message: "overloaded".to_string(),
    });
    let (store, app) = test_app(provider);

    let response = app
        .oneshot(post_json(
            "/api/v1/generate",
            r#"{"prompt":"todo list app"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["code"], "UPSTREAM_ERROR");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_generate_upstream_timeout_is_gateway_timeout() {
    let provider = MockCompletionProvider::failing(forge_core::LlmError::Timeout {
        provider: "openai".to_string(),
        elapsed_ms: 60_000,
    });
    let (_, app) = test_app(provider);

    let response = app
        .oneshot(post_json(
            "/api/v1/generate",
            r#"{"prompt":"todo list app"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
}

// ============================================================================
// PROJECT LISTING ENDPOINT
// ============================================================================

#[tokio::test]
async fn test_projects_listing_newest_first() {
    let raw = r#"{"a.txt":"x"}"#;
    let (_, app) = test_app(MockCompletionProvider::returning(raw));

    for prompt in ["first", "second"] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/generate",
                &format!(r#"{{"prompt":"{}","user_id":"user-1"}}"#, prompt),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(get("/api/v1/projects/user-1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["projects"][0]["prompt"], "second");
    assert_eq!(body["projects"][1]["prompt"], "first");
    assert_eq!(body["projects"][0]["llm_output"], raw);
}

#[tokio::test]
async fn test_projects_listing_empty_for_unknown_user() {
    let (_, app) = test_app(MockCompletionProvider::returning("x"));

    let response = app
        .oneshot(get("/api/v1/projects/nobody"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 0);
}

// ============================================================================
// HEALTH ENDPOINTS
// ============================================================================

#[tokio::test]
async fn test_health_ping() {
    let (_, app) = test_app(MockCompletionProvider::returning("x"));

    let response = app.oneshot(get("/health/ping")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_live() {
    let (_, app) = test_app(MockCompletionProvider::returning("x"));

    let response = app.oneshot(get("/health/live")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}
