//! User account handlers.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::info;

use crate::auth::hash_password;
use crate::db::{NewUser, UserRepository};
use crate::web::dto::{RegisterRequest, UserResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::XToken;

/// POST /users - Register a new user account.
pub async fn post_new(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let email = match request.email.as_deref() {
        Some(email) if !email.is_empty() => email,
        _ => return Err(ApiError::bad_request("Missing email")),
    };
    let password = match request.password.as_deref() {
        Some(password) if !password.is_empty() => password,
        _ => return Err(ApiError::bad_request("Missing password")),
    };

    let users = UserRepository::new(state.db.pool());
    if users.get_by_email(email).await?.is_some() {
        return Err(ApiError::bad_request("Already exist"));
    }

    let hash = hash_password(password).map_err(|e| {
        tracing::error!("Password hashing failed: {}", e);
        ApiError::internal("An internal error occurred")
    })?;

    let user = users.create(&NewUser::new(email, &hash)).await?;
    info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /users/me - Return the authenticated user's account.
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    XToken(token): XToken,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.require_user(&token).await?;
    Ok(Json(UserResponse::from(user)))
}
