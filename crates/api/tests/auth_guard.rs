//! Authorization tests: every `/role` operation needs the privileged role,
//! and rejected callers never reach the store.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, build_test_app, seeded_store, send, token_with_roles, user_token};
use serde_json::json;

fn role_requests() -> Vec<(Method, &'static str, Option<serde_json::Value>)> {
    vec![
        (Method::GET, "/role", None),
        (Method::POST, "/role", Some(json!({ "name": "ops", "users": ["alice"] }))),
        (Method::PUT, "/role", Some(json!({ "id": 1, "name": "ops", "users": [] }))),
        (Method::DELETE, "/role?id=1", None),
    ]
}

#[tokio::test]
async fn missing_token_returns_401_for_every_operation() {
    let store = seeded_store();

    for (method, uri, body) in role_requests() {
        let response = send(build_test_app(store.clone()), method.clone(), uri, None, body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
    }
    assert_eq!(store.role_count().await, 0);
}

#[tokio::test]
async fn garbage_token_returns_401() {
    let store = seeded_store();

    let response = send(
        build_test_app(store),
        Method::GET,
        "/role",
        Some("not-a-jwt"),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn caller_without_privileged_role_gets_403_for_every_operation() {
    let store = seeded_store();
    let token = user_token();

    for (method, uri, body) in role_requests() {
        let response = send(
            build_test_app(store.clone()),
            method.clone(),
            uri,
            Some(token.as_str()),
            body,
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{method} {uri}");
        assert_eq!(body_json(response).await["code"], "FORBIDDEN");
    }
    assert_eq!(store.role_count().await, 0);
}

#[tokio::test]
async fn role_match_is_case_sensitive() {
    let store = seeded_store();
    let token = token_with_roles(&["admin"]);

    let response = send(build_test_app(store), Method::GET, "/role", Some(token.as_str()), None).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn privileged_role_among_others_is_accepted() {
    let store = seeded_store();
    let token = token_with_roles(&["USER", "ADMIN"]);

    let response = send(build_test_app(store), Method::GET, "/role", Some(token.as_str()), None).await;

    assert_eq!(response.status(), StatusCode::OK);
}

/// The guard runs before body parsing, so a malformed body from an
/// unprivileged caller is still a 403.
#[tokio::test]
async fn guard_runs_before_body_parsing() {
    let store = seeded_store();
    let token = user_token();

    let response = send(
        build_test_app(store),
        Method::POST,
        "/role",
        Some(token.as_str()),
        Some(json!({ "unexpected": true })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
