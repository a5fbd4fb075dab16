//! Shared harness for HTTP-level tests.
//!
//! Builds the production router over a [`MemoryStore`] and provides request
//! helpers driven through `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use rolegate_api::auth::jwt::{generate_access_token, JwtConfig};
use rolegate_api::config::{ServerConfig, StorageBackend};
use rolegate_api::router::build_app_router;
use rolegate_api::state::AppState;
use rolegate_core::role_service::RoleService;
use rolegate_db::MemoryStore;

pub const ADMIN_ROLE: &str = "ADMIN";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        admin_role: ADMIN_ROLE.to_string(),
        storage: StorageBackend::Memory,
        seed_users: Vec::new(),
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router backed by `store`.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    let service = RoleService::new(store.clone(), store);
    build_app_router(AppState::new(test_config(), service))
}

/// A store seeded with `alice`, `bob` and `carol`.
pub fn seeded_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_users(["alice", "bob", "carol"]))
}

/// Token for a caller holding the privileged role.
pub fn admin_token() -> String {
    token_with_roles(&[ADMIN_ROLE])
}

/// Token for an authenticated caller without the privileged role.
pub fn user_token() -> String {
    token_with_roles(&["USER"])
}

pub fn token_with_roles(roles: &[&str]) -> String {
    let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
    generate_access_token("tester", &roles, &test_config().jwt).expect("token should sign")
}

/// Send a request with an optional bearer token and JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
