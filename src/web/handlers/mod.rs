//! API handlers for filedepot.

pub mod auth;
pub mod file;
pub mod status;
pub mod user;

pub use auth::*;
pub use file::*;
pub use status::*;
pub use user::*;

use crate::auth::{TokenStore, UserResolver};
use crate::db::{Database, User, UserRepository};
use crate::file::BlobStore;
use crate::web::error::ApiError;

/// Shared application state.
pub struct AppState {
    /// Document store.
    pub db: Database,
    /// Blob store for file content.
    pub blobs: BlobStore,
    /// Session token store.
    pub tokens: TokenStore,
}

impl AppState {
    /// Create application state over the given stores.
    pub fn new(db: Database, blobs: BlobStore, tokens: TokenStore) -> Self {
        Self { db, blobs, tokens }
    }

    /// Resolve a session token to a user, rejecting with 401 when the
    /// token is unknown, expired, or maps to a vanished account.
    pub async fn require_user(&self, token: &str) -> Result<User, ApiError> {
        let resolver = UserResolver::new(&self.tokens, UserRepository::new(self.db.pool()));
        resolver
            .resolve(Some(token))
            .await?
            .ok_or_else(ApiError::unauthorized)
    }
}
