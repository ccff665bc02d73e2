//! Response DTOs for the filedepot API.

use serde::Serialize;

use crate::db::User;
use crate::file::FileEntry;

/// A file entry as exposed over the wire.
///
/// The on-disk blob location is deliberately absent.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntryResponse {
    /// Entry id.
    pub id: i64,
    /// Owning user's id.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// Entry kind: `file`, `image`, or `folder`.
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Visibility flag.
    pub is_public: bool,
    /// Parent folder id, 0 for root.
    pub parent_id: i64,
}

impl From<FileEntry> for FileEntryResponse {
    fn from(entry: FileEntry) -> Self {
        Self {
            id: entry.id,
            user_id: entry.user_id,
            name: entry.name,
            entry_type: entry.entry_type.as_str().to_string(),
            is_public: entry.is_public,
            parent_id: entry.parent.as_id(),
        }
    }
}

/// A user account as exposed over the wire.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User id.
    pub id: i64,
    /// Email address.
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Session token issued on login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Opaque session token.
    pub token: String,
}

/// Backing-store liveness report.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Key-value token store is answering.
    pub redis: bool,
    /// Document store is answering.
    pub db: bool,
}

/// Stored object counts.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Number of user accounts.
    pub users: i64,
    /// Number of file entries.
    pub files: i64,
}
