// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    routing::get,
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use seo_tag_analyzer::{config::Config, handlers, state::AppState};

/// Config for tests: loopback targets allowed so a local upstream can be used.
pub fn test_config() -> Config {
    Config {
        fetch_timeout: Duration::from_secs(5),
        block_private_hosts: false,
        ..Config::default()
    }
}

/// Build the application router with the given config.
pub fn create_test_app(config: Config) -> Router {
    let state = AppState::new(config).expect("Failed to build test state");
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/analyze", get(handlers::analyze::analyze_url))
        .with_state(state)
}

/// Serve `router` on an ephemeral loopback port, standing in for the site
/// being analyzed. The server lives for the rest of the test's runtime.
pub async fn spawn_upstream(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind upstream listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Percent-encode `url` for use as the `url` query parameter.
pub fn analyze_uri(url: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(url.as_bytes()).collect();
    format!("/api/analyze?url={encoded}")
}

// ── Request helpers ──────────────────────────────────────────────────────────

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
