//! File management for filedepot: metadata, blob storage, validation,
//! access policy, and the orchestrating service.

pub mod access;
pub mod metadata;
pub mod service;
pub mod storage;
pub mod validation;

pub use metadata::{EntryType, FileEntry, FileEntryRepository, NewEntry, ParentRef, PAGE_SIZE};
pub use service::FileService;
pub use storage::BlobStore;
pub use validation::{CreateRequest, CreateValidator, ValidatedCreate};
