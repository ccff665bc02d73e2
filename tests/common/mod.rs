//! Shared helpers for web API integration tests.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderValue;
use axum_test::TestServer;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{json, Value};
use std::sync::Arc;

use filedepot::web::handlers::AppState;
use filedepot::{create_router, BlobStore, Database, TokenStore};

/// A test server together with the state backing it.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    _blob_dir: tempfile::TempDir,
}

/// Create a test server over an in-memory database and a throwaway
/// blob directory.
pub async fn create_test_server() -> TestApp {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let blob_dir = tempfile::tempdir().expect("Failed to create blob directory");
    let blobs = BlobStore::new(blob_dir.path());
    let tokens = TokenStore::new();

    let state = Arc::new(AppState::new(db, blobs, tokens));
    let router = create_router(state.clone(), &[]);
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        state,
        _blob_dir: blob_dir,
    }
}

/// Register a user and return the response body.
pub async fn register_test_user(server: &TestServer, email: &str, password: &str) -> Value {
    let response = server
        .post("/users")
        .json(&json!({ "email": email, "password": password }))
        .await;

    response.json::<Value>()
}

/// Build a Basic authorization header value.
pub fn basic_auth(email: &str, password: &str) -> HeaderValue {
    let encoded = BASE64.encode(format!("{email}:{password}"));
    HeaderValue::from_str(&format!("Basic {encoded}")).expect("Invalid header value")
}

/// Log a registered user in and return their session token.
pub async fn get_access_token(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .get("/connect")
        .add_header(AUTHORIZATION, basic_auth(email, password))
        .await;

    response.json::<Value>()["token"]
        .as_str()
        .expect("No token in connect response")
        .to_string()
}

/// Register a user and open a session in one step.
pub async fn register_and_connect(server: &TestServer, email: &str, password: &str) -> String {
    register_test_user(server, email, password).await;
    get_access_token(server, email, password).await
}
