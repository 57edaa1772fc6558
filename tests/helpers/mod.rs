//! Shared setup for the HTTP-level tests: an app wired to mock providers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    Router,
};
use http::{header, HeaderMap, Method, Request, StatusCode};
use newshub::{
    routes::make_app,
    utils::{config::Config, providers::NewsProvider, state::AppState},
};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::MockServer;

pub const JWT_SECRET: &str = "test-secret";

pub fn test_config(guardian_base_url: &str, mediastack_base_url: &str) -> Config {
    Config {
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: JWT_SECRET.into(),
        token_ttl_hours: 1,
        guardian_api_key: "guardian-key".into(),
        guardian_base_url: guardian_base_url.into(),
        mediastack_api_key: "mediastack-key".into(),
        mediastack_base_url: mediastack_base_url.into(),
        provider_timeout_secs: 2,
        cors_origin: "http://localhost:3000".into(),
        users_file: None,
    }
}

pub async fn app_with(config: Config) -> Router {
    let state = Arc::new(AppState::init(config).await.unwrap());
    make_app(state).unwrap()
}

/// App with a hand-picked provider list instead of the HTTP clients.
pub async fn app_with_providers(providers: Vec<Arc<dyn NewsProvider>>) -> Router {
    let config = test_config("http://127.0.0.1:9", "http://127.0.0.1:9");
    let state = Arc::new(AppState::with_providers(config, providers).await.unwrap());
    make_app(state).unwrap()
}

/// App whose providers both point at `server`.
pub async fn app_for(server: &MockServer) -> Router {
    app_with(test_config(&server.uri(), &server.uri())).await
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(app: &Router, req: Request<Body>) -> TestResponse {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Registers `username` and returns the issued token.
pub async fn register(app: &Router, username: &str, password: &str) -> String {
    let res = send(
        app,
        json_request(
            Method::POST,
            "/register",
            serde_json::json!({"username": username, "password": password}),
            None,
        ),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    res.body["token"].as_str().unwrap().to_string()
}
