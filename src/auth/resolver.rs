//! Session token to user identity resolution.

use crate::db::{User, UserRepository};
use crate::Result;

use super::token::TokenStore;

/// Resolves an opaque session token to a user account.
///
/// A token resolves through two hops: the key-value token store maps
/// `auth_<token>` to a user id, and the document store supplies the
/// user record. A miss at either hop yields no identity.
pub struct UserResolver<'a> {
    tokens: &'a TokenStore,
    users: UserRepository<'a>,
}

impl<'a> UserResolver<'a> {
    /// Create a new resolver over the given stores.
    pub fn new(tokens: &'a TokenStore, users: UserRepository<'a>) -> Self {
        Self { tokens, users }
    }

    /// Resolve a token to a user, if the session and account both exist.
    pub async fn resolve(&self, token: Option<&str>) -> Result<Option<User>> {
        let Some(token) = token else {
            return Ok(None);
        };

        let Some(user_id) = self.tokens.get(token) else {
            return Ok(None);
        };

        self.users.get_by_id(user_id).await
    }

    /// Resolve a token to a user id without loading the account record.
    pub fn resolve_id(&self, token: Option<&str>) -> Option<i64> {
        token.and_then(|t| self.tokens.get(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, NewUser};

    #[tokio::test]
    async fn test_resolve_valid_token() {
        let db = Database::open_in_memory().await.unwrap();
        let tokens = TokenStore::new();

        let user = UserRepository::new(db.pool())
            .create(&NewUser::new("bob@dylan.com", "hash"))
            .await
            .unwrap();
        let token = tokens.issue(user.id);

        let resolver = UserResolver::new(&tokens, UserRepository::new(db.pool()));
        let resolved = resolver.resolve(Some(&token)).await.unwrap();

        assert_eq!(resolved.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_resolve_no_token() {
        let db = Database::open_in_memory().await.unwrap();
        let tokens = TokenStore::new();

        let resolver = UserResolver::new(&tokens, UserRepository::new(db.pool()));
        assert!(resolver.resolve(None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resolve_unknown_token() {
        let db = Database::open_in_memory().await.unwrap();
        let tokens = TokenStore::new();

        let resolver = UserResolver::new(&tokens, UserRepository::new(db.pool()));
        let resolved = resolver.resolve(Some("bogus")).await.unwrap();
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_resolve_token_for_deleted_user() {
        // Token maps to a user id the document store no longer knows
        let db = Database::open_in_memory().await.unwrap();
        let tokens = TokenStore::new();
        let token = tokens.issue(9999);

        let resolver = UserResolver::new(&tokens, UserRepository::new(db.pool()));
        assert!(resolver.resolve(Some(&token)).await.unwrap().is_none());
    }
}
