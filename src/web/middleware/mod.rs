//! Middleware for the filedepot web layer.

pub mod auth;
pub mod cors;

pub use auth::{OptionalXToken, XToken, TOKEN_HEADER};
pub use cors::create_cors_layer;
