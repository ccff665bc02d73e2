//! Session token store for filedepot.
//!
//! An in-process key-value store mapping `auth_<token>` keys to user
//! ids, with per-entry expiry. This mirrors the external key-value
//! contract (`get(key) -> value|null`) the rest of the crate consumes.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

/// Default session token lifetime (24 hours).
pub const DEFAULT_TOKEN_DURATION_SECS: u64 = 24 * 60 * 60;

/// Key prefix for session tokens.
const AUTH_KEY_PREFIX: &str = "auth_";

#[derive(Debug, Clone)]
struct TokenEntry {
    user_id: i64,
    expires_at: DateTime<Utc>,
}

impl TokenEntry {
    fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Store of active session tokens.
///
/// Keys are stored as `auth_<token>`; expired entries are rejected on
/// read and removed by [`TokenStore::cleanup`].
#[derive(Debug)]
pub struct TokenStore {
    entries: Mutex<HashMap<String, TokenEntry>>,
    token_duration: Duration,
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore {
    /// Create a token store with the default 24-hour lifetime.
    pub fn new() -> Self {
        Self::with_duration(Duration::from_secs(DEFAULT_TOKEN_DURATION_SECS))
    }

    /// Create a token store with a custom token lifetime.
    pub fn with_duration(token_duration: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            token_duration,
        }
    }

    /// Issue a new session token for a user.
    ///
    /// Returns the bare token (without the `auth_` key prefix).
    pub fn issue(&self, user_id: i64) -> String {
        let token = Uuid::new_v4().to_string();

        // A configured lifetime too large for the calendar clamps to
        // "never expires" rather than expiring on the spot
        let lifetime =
            chrono::Duration::from_std(self.token_duration).unwrap_or(chrono::Duration::MAX);
        let expires_at = Utc::now()
            .checked_add_signed(lifetime)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let entry = TokenEntry {
            user_id,
            expires_at,
        };

        let mut entries = self.entries.lock().expect("token store lock poisoned");
        entries.insert(format!("{AUTH_KEY_PREFIX}{token}"), entry);

        info!(user_id = user_id, "Issued session token");
        token
    }

    /// Resolve a token to a user id.
    ///
    /// Expired entries are removed on the spot and resolve to None.
    pub fn get(&self, token: &str) -> Option<i64> {
        let key = format!("{AUTH_KEY_PREFIX}{token}");
        let mut entries = self.entries.lock().expect("token store lock poisoned");

        match entries.get(&key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(&key);
                debug!("Rejected expired session token");
                None
            }
            Some(entry) => Some(entry.user_id),
            None => None,
        }
    }

    /// Delete a token (logout).
    ///
    /// Returns `true` if the token existed.
    pub fn delete(&self, token: &str) -> bool {
        let key = format!("{AUTH_KEY_PREFIX}{token}");
        let mut entries = self.entries.lock().expect("token store lock poisoned");

        if let Some(entry) = entries.remove(&key) {
            info!(user_id = entry.user_id, "Session token deleted");
            true
        } else {
            debug!("Delete: session token not found");
            false
        }
    }

    /// Remove expired entries to prevent unbounded growth.
    pub fn cleanup(&self) -> usize {
        let mut entries = self.entries.lock().expect("token store lock poisoned");
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired());

        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed = removed, "Cleaned up expired session tokens");
        }
        removed
    }

    /// Check that the store is usable.
    pub fn is_alive(&self) -> bool {
        self.entries.lock().is_ok()
    }

    /// Number of live tokens (including not-yet-swept expired ones).
    pub fn len(&self) -> usize {
        self.entries.lock().expect("token store lock poisoned").len()
    }

    /// Whether the store holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
