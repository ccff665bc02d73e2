//! Web API User and Session Tests
//!
//! Integration tests for registration, login, logout, and the status
//! endpoints.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde_json::{json, Value};

use common::{basic_auth, create_test_server, get_access_token, register_test_user};

fn x_token(token: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-token"),
        HeaderValue::from_str(token).unwrap(),
    )
}

#[tokio::test]
async fn test_status() {
    let app = create_test_server().await;

    let response = app.server.get("/status").await;
    response.assert_status(StatusCode::OK);
    response.assert_json(&json!({ "redis": true, "db": true }));
}

#[tokio::test]
async fn test_stats_counts_grow() {
    let app = create_test_server().await;

    let response = app.server.get("/stats").await;
    response.assert_json(&json!({ "users": 0, "files": 0 }));

    register_test_user(&app.server, "bob@dylan.com", "toto1234!").await;

    let response = app.server.get("/stats").await;
    response.assert_json(&json!({ "users": 1, "files": 0 }));
}

#[tokio::test]
async fn test_register_user() {
    let app = create_test_server().await;

    let response = app
        .server
        .post("/users")
        .json(&json!({ "email": "bob@dylan.com", "password": "toto1234!" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["email"], "bob@dylan.com");
    assert!(body["id"].as_i64().unwrap() > 0);
    // The password hash never leaves the server
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = create_test_server().await;

    let response = app
        .server
        .post("/users")
        .json(&json!({ "password": "toto1234!" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Missing email" }));

    let response = app
        .server
        .post("/users")
        .json(&json!({ "email": "bob@dylan.com" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Missing password" }));
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = create_test_server().await;

    register_test_user(&app.server, "bob@dylan.com", "toto1234!").await;

    let response = app
        .server
        .post("/users")
        .json(&json!({ "email": "bob@dylan.com", "password": "other" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Already exist" }));
}

#[tokio::test]
async fn test_connect_and_me() {
    let app = create_test_server().await;
    register_test_user(&app.server, "bob@dylan.com", "toto1234!").await;

    let token = get_access_token(&app.server, "bob@dylan.com", "toto1234!").await;
    assert!(!token.is_empty());

    let (name, value) = x_token(&token);
    let response = app.server.get("/users/me").add_header(name, value).await;
    response.assert_status(StatusCode::OK);

    let body = response.json::<Value>();
    assert_eq!(body["email"], "bob@dylan.com");
}

#[tokio::test]
async fn test_connect_wrong_password() {
    let app = create_test_server().await;
    register_test_user(&app.server, "bob@dylan.com", "toto1234!").await;

    let response = app
        .server
        .get("/connect")
        .add_header(AUTHORIZATION, basic_auth("bob@dylan.com", "wrong"))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn test_connect_unknown_user() {
    let app = create_test_server().await;

    let response = app
        .server
        .get("/connect")
        .add_header(AUTHORIZATION, basic_auth("nobody@example.com", "pw"))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_connect_without_credentials() {
    let app = create_test_server().await;

    let response = app.server.get("/connect").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_disconnect_invalidates_token() {
    let app = create_test_server().await;
    register_test_user(&app.server, "bob@dylan.com", "toto1234!").await;
    let token = get_access_token(&app.server, "bob@dylan.com", "toto1234!").await;

    let (name, value) = x_token(&token);
    let response = app
        .server
        .get("/disconnect")
        .add_header(name.clone(), value.clone())
        .await;
    response.assert_status(StatusCode::NO_CONTENT);
    assert!(app.state.tokens.is_empty());

    // The token no longer resolves
    let response = app.server.get("/users/me").add_header(name, value).await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn test_me_without_token() {
    let app = create_test_server().await;

    let response = app.server.get("/users/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_bogus_token() {
    let app = create_test_server().await;

    let (name, value) = x_token("not-a-real-token");
    let response = app.server.get("/users/me").add_header(name, value).await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}
