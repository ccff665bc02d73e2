//! Request DTOs for the filedepot API.

use serde::Deserialize;

/// Body of a user registration request.
///
/// Both fields are optional at the wire level; the handler reports
/// which one is missing.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Query parameters for the file listing endpoint.
///
/// Both arrive as strings; anything unparseable falls back to the
/// defaults (root parent, first page).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub parent_id: Option<String>,
    pub page: Option<String>,
}

impl ListQuery {
    /// Page number, defaulting to 0 for anything unparseable.
    pub fn page_number(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or(0)
    }
}

/// Query parameters for the content endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct DataQuery {
    /// Size variant, e.g. `500`, `250`, or `100`.
    pub size: Option<String>,
}
