//! Blob storage for filedepot.
//!
//! Content bytes live on disk under a single root directory, one
//! opaque uuid-named file per blob. All naming and hierarchy is
//! metadata-level; the blob layout is flat.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::{DepotError, Result};

/// Flat on-disk blob store.
///
/// The root directory is created lazily on first write, so a
/// misconfigured path only fails when content is actually stored.
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Create a blob store rooted at the given directory.
    ///
    /// The directory is not touched until the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The configured root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a blob and return its absolute path.
    ///
    /// The blob gets a fresh uuid name; callers persist the returned
    /// path in entry metadata.
    pub fn write(&self, data: &[u8]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.root)
            .map_err(|e| DepotError::Storage(format!("cannot create blob root: {e}")))?;

        let path = self.root.join(Uuid::new_v4().to_string());
        std::fs::write(&path, data)
            .map_err(|e| DepotError::Storage(format!("cannot write blob: {e}")))?;

        debug!(path = %path.display(), bytes = data.len(), "Stored blob");
        Ok(path)
    }

    /// Read a blob back, optionally at a named size variant.
    ///
    /// A size variant lives next to the original as
    /// `<path>_<size>`. Any read failure (missing file, bad
    /// permissions) surfaces as NotFound; callers must not learn
    /// whether the path exists.
    pub fn read(&self, path: &str, size: Option<&str>) -> Result<Vec<u8>> {
        let target = match size {
            Some(size) => format!("{path}_{size}"),
            None => path.to_string(),
        };

        std::fs::read(&target).map_err(|e| {
            warn!(path = %target, error = %e, "Blob read failed");
            DepotError::NotFound("file".to_string())
        })
    }
}
