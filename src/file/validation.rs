//! Upload request validation for filedepot.
//!
//! Normalizes the loosely-typed wire request into a [`ValidatedCreate`]
//! bundle. Failures are reported in a fixed order, first failure wins.

use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use crate::{DepotError, Result};

use super::metadata::{EntryType, FileEntryRepository, ParentRef};

/// Wire shape of an upload request.
///
/// Every field is optional at this level; the validator decides what
/// is actually required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
    /// Base64-encoded payload; required unless the type is folder.
    pub data: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    /// Parent id as a JSON number or string; absent, `0`, and `"0"`
    /// all mean root.
    pub parent_id: Option<Value>,
}

/// A validated and normalized upload request.
#[derive(Debug, Clone)]
pub struct ValidatedCreate {
    pub name: String,
    pub entry_type: EntryType,
    /// Base64 payload, present iff the type carries content.
    pub data: Option<String>,
    pub is_public: bool,
    pub parent: ParentRef,
}

/// Validates upload requests against the entry hierarchy.
pub struct CreateValidator<'a> {
    entries: FileEntryRepository<'a>,
}

impl<'a> CreateValidator<'a> {
    /// Create a validator over the given entry repository.
    pub fn new(entries: FileEntryRepository<'a>) -> Self {
        Self { entries }
    }

    /// Validate a request, resolving its parent reference.
    ///
    /// Check order: name, type, data, then the parent. Performs no
    /// writes; the parent lookup is the only store access.
    pub async fn validate(&self, request: &CreateRequest) -> Result<ValidatedCreate> {
        let name = match request.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(DepotError::Validation("Missing name".to_string())),
        };

        let entry_type = request
            .entry_type
            .as_deref()
            .and_then(|t| EntryType::from_str(t).ok())
            .ok_or_else(|| DepotError::Validation("Missing type".to_string()))?;

        let data = match (&request.data, entry_type.has_content()) {
            (Some(data), true) => Some(data.clone()),
            (None, true) => return Err(DepotError::Validation("Missing data".to_string())),
            // Folders never carry data, even when some was sent
            (_, false) => None,
        };

        let parent = self.resolve_parent(request.parent_id.as_ref()).await?;

        Ok(ValidatedCreate {
            name,
            entry_type,
            data,
            is_public: request.is_public,
            parent,
        })
    }

    /// Resolve the wire-level parent id to a [`ParentRef`].
    ///
    /// A syntactically invalid id is indistinguishable from a missing
    /// parent.
    async fn resolve_parent(&self, raw: Option<&Value>) -> Result<ParentRef> {
        let id = match parse_parent_id(raw) {
            Some(0) => return Ok(ParentRef::Root),
            Some(id) => id,
            None if raw.is_none() => return Ok(ParentRef::Root),
            None => return Err(DepotError::Validation("Parent not found".to_string())),
        };

        let parent = self
            .entries
            .get_by_id(id)
            .await?
            .ok_or_else(|| DepotError::Validation("Parent not found".to_string()))?;

        if parent.entry_type != EntryType::Folder {
            return Err(DepotError::Validation(
                "Parent is not a folder".to_string(),
            ));
        }

        Ok(ParentRef::Folder(id))
    }
}

fn parse_parent_id(raw: Option<&Value>) -> Option<i64> {
    match raw {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    }
}
