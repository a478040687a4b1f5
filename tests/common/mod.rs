//! Shared utilities for integration testing.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use admission_gate::config::GateConfig;
use admission_gate::http::server::{build_router, AppState};
use admission_gate::GatePipeline;

/// Config pointing at a (usually nonexistent) secret store, with a
/// short auth delay so failure paths do not slow the suite down.
pub fn test_config(store_path: &str) -> GateConfig {
    let mut config = GateConfig::default();
    config.secrets.store_path = store_path.to_string();
    config.auth.failure_delay_ms = 10;
    config
}

/// Write a TOML secret store under a unique temp name.
#[allow(dead_code)]
pub fn write_secret_store(file_name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(file_name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Build the gate router the way the server does.
pub fn gate_router(config: &GateConfig) -> Router {
    let pipeline = Arc::new(GatePipeline::new(config));
    let state = AppState {
        pipeline,
        cookie_name: config.session.cookie_name.clone(),
    };
    build_router(config, state)
}

/// Drive one request through the router.
pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

/// Build a GET request, optionally replaying a session cookie.
#[allow(dead_code)]
pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Build a JSON POST request, optionally replaying a session cookie.
pub fn post_json(uri: &str, cookie: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Extract the session cookie pair from a response, if one was set.
#[allow(dead_code)]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.to_string())
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A well-formed pair of title lists.
#[allow(dead_code)]
pub fn valid_submission() -> serde_json::Value {
    serde_json::json!({
        "partner1": ["Heat", "Ronin", "Collateral"],
        "partner2": ["Amélie", "Chocolat", "Ratatouille"],
    })
}
