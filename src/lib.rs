//! filedepot - a small file storage service.
//!
//! Users register, open a session, and upload files, images, and
//! folders into a parent/child hierarchy. Content is private to its
//! owner unless published.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod web;

pub use auth::{hash_password, verify_password, PasswordError, TokenStore, UserResolver};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{DepotError, Result};
pub use file::{
    BlobStore, CreateRequest, EntryType, FileEntry, FileEntryRepository, FileService, NewEntry,
    ParentRef,
};
pub use web::{create_router, ApiError, WebServer};
