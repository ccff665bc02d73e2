//! Health and statistics handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::db::UserRepository;
use crate::file::FileEntryRepository;
use crate::web::dto::{StatsResponse, StatusResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// GET /status - Report backing-store liveness.
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        redis: state.tokens.is_alive(),
        db: state.db.is_alive().await,
    })
}

/// GET /stats - Report stored user and file counts.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, ApiError> {
    let users = UserRepository::new(state.db.pool()).count().await?;
    let files = FileEntryRepository::new(state.db.pool()).count().await?;

    Ok(Json(StatsResponse { users, files }))
}
