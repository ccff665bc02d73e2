//! Session handlers: login and logout.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::sync::Arc;
use tracing::{debug, info};

use crate::auth::verify_password;
use crate::db::UserRepository;
use crate::web::dto::TokenResponse;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::XToken;

/// Parse `Basic <base64(email:password)>` credentials.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;

    let (email, password) = decoded.split_once(':')?;
    Some((email.to_string(), password.to_string()))
}

/// GET /connect - Exchange Basic credentials for a session token.
pub async fn get_connect(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let (email, password) = basic_credentials(&headers).ok_or_else(ApiError::unauthorized)?;

    let user = UserRepository::new(state.db.pool())
        .get_by_email(&email)
        .await?
        .ok_or_else(ApiError::unauthorized)?;

    if verify_password(&password, &user.password).is_err() {
        debug!(user_id = user.id, "Login rejected: bad password");
        return Err(ApiError::unauthorized());
    }

    let token = state.tokens.issue(user.id);
    info!(user_id = user.id, "User connected");

    Ok(Json(TokenResponse { token }))
}

/// GET /disconnect - Invalidate the caller's session token.
pub async fn get_disconnect(
    State(state): State<Arc<AppState>>,
    XToken(token): XToken,
) -> Result<StatusCode, ApiError> {
    // The token must map to a live session before it can be revoked
    state.require_user(&token).await?;
    state.tokens.delete(&token);

    Ok(StatusCode::NO_CONTENT)
}
