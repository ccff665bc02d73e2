//! Web API module for filedepot.
//!
//! Exposes the REST API: user accounts, session tokens, and the file
//! storage endpoints.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
