//! Request and response DTOs for the filedepot API.

pub mod request;
pub mod response;

pub use request::{DataQuery, ListQuery, RegisterRequest};
pub use response::{
    FileEntryResponse, StatsResponse, StatusResponse, TokenResponse, UserResponse,
};
