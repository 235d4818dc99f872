#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::Router;
use common_auth::{TokenConfig, TokenService};
use enrollment_service::gateway::StubGateway;
use enrollment_service::{router, AppState};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;

/// App wired with a stub gateway and a lazy pool that never connects.
/// Routes that touch the database would fail with a 500, which the
/// DB-free tests rely on to prove no query was issued.
pub fn test_app() -> (Router, Arc<TokenService>) {
    let tokens = Arc::new(TokenService::new(TokenConfig::new("test-secret")));
    let db = PgPoolOptions::new()
        .connect_lazy("postgres://127.0.0.1:1/unreachable")
        .expect("lazy pool");
    let state = AppState {
        db,
        tokens: tokens.clone(),
        gateway: Arc::new(StubGateway::new()),
    };
    (router(state), tokens)
}

pub fn get(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path).method("GET");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, path: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(path)
        .method(method)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
