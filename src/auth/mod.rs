//! Authentication for filedepot: password hashing, session tokens,
//! and token-to-user resolution.

mod password;
mod resolver;
mod token;

pub use password::{hash_password, verify_password, PasswordError};
pub use resolver::UserResolver;
pub use token::{TokenStore, DEFAULT_TOKEN_DURATION_SECS};
