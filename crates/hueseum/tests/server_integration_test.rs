//! Liveness, CORS and body-limit behaviour of the router.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{fixtures, TestApp};
use hueseum::ServerConfig;
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
async fn test_root_and_health() {
    let app = TestApp::new();

    let response = app.get("/").await;
    common::assert_ok(&response);
    let json: Value = response.json();
    assert_eq!(json, json!({"message": "Hueseum API is running"}));

    let response = app.get("/health").await;
    common::assert_ok(&response);
    let json: Value = response.json();
    assert_eq!(json, json!({"status": "healthy"}));
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new();
    let response = app.get("/nope").await;
    common::assert_status(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_allow_list() {
    let router = hueseum::server::build_router(hueseum::server::AppState::new(ServerConfig::default()));

    let preflight = |origin: &'static str| {
        Request::builder()
            .method("OPTIONS")
            .uri("/palette")
            .header("Origin", origin)
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type")
            .body(Body::empty())
            .unwrap()
    };

    let allowed = router.clone().oneshot(preflight("http://localhost:3000")).await.unwrap();
    assert_eq!(
        allowed
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
    let header = |name: &str| allowed.headers().get(name).and_then(|v| v.to_str().ok());
    assert_eq!(header("access-control-allow-credentials"), Some("true"));
    assert_eq!(header("access-control-allow-methods"), Some("POST"));
    assert_eq!(header("access-control-allow-headers"), Some("content-type"));

    let denied = router.oneshot(preflight("http://evil.example")).await.unwrap();
    assert!(denied.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn test_body_limit() {
    let app = TestApp::with_config(ServerConfig {
        max_body_bytes: 1024,
        ..ServerConfig::default()
    });

    let big = vec![7u8; 4096];
    let response = app.post_json("/image-dimensions", &fixtures::image_body(&big)).await;
    common::assert_error(&response, StatusCode::PAYLOAD_TOO_LARGE);
}
