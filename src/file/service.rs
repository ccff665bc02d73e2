//! File service: the orchestration layer over validation, blob
//! storage, metadata, and access control.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sqlx::SqlitePool;
use tracing::info;

use crate::{DepotError, Result};

use super::access;
use super::metadata::{FileEntry, FileEntryRepository, NewEntry, ParentRef};
use super::storage::BlobStore;
use super::validation::{CreateRequest, CreateValidator};

/// Service for creating, listing, and reading file entries.
pub struct FileService<'a> {
    pool: &'a SqlitePool,
    blobs: &'a BlobStore,
}

impl<'a> FileService<'a> {
    /// Create a new FileService over the given stores.
    pub fn new(pool: &'a SqlitePool, blobs: &'a BlobStore) -> Self {
        Self { pool, blobs }
    }

    fn entries(&self) -> FileEntryRepository<'a> {
        FileEntryRepository::new(self.pool)
    }

    /// Create a file, image, or folder for a user.
    ///
    /// Validation runs first and performs no writes; the blob is
    /// stored before the metadata row so a stored row always points at
    /// existing content.
    pub async fn create(&self, user_id: i64, request: &CreateRequest) -> Result<FileEntry> {
        let validated = CreateValidator::new(self.entries())
            .validate(request)
            .await?;

        let local_path = match &validated.data {
            Some(data) => {
                let bytes = BASE64
                    .decode(data)
                    .map_err(|_| DepotError::Validation("Missing data".to_string()))?;
                let path = self.blobs.write(&bytes)?;
                Some(path.to_string_lossy().into_owned())
            }
            None => None,
        };

        let entry = self
            .entries()
            .insert(&NewEntry {
                user_id,
                name: validated.name,
                entry_type: validated.entry_type,
                is_public: validated.is_public,
                parent: validated.parent,
                local_path,
            })
            .await?;

        info!(
            file_id = entry.id,
            user_id = user_id,
            entry_type = %entry.entry_type,
            "File entry created"
        );
        Ok(entry)
    }

    /// Get an entry's metadata, scoped to its owner.
    pub async fn get_owned(&self, id: i64, user_id: i64) -> Result<FileEntry> {
        self.entries()
            .get_by_id_for_owner(id, user_id)
            .await?
            .ok_or_else(|| DepotError::NotFound("file".to_string()))
    }

    /// List a user's entries under a parent folder, paged.
    pub async fn list_children(
        &self,
        user_id: i64,
        parent: ParentRef,
        page: i64,
    ) -> Result<Vec<FileEntry>> {
        self.entries().list_children(user_id, parent, page).await
    }

    /// Set an entry's visibility flag, scoped to its owner.
    ///
    /// Idempotent: re-applying the current flag succeeds and returns
    /// the entry unchanged.
    pub async fn set_visibility(
        &self,
        id: i64,
        user_id: i64,
        is_public: bool,
    ) -> Result<FileEntry> {
        let entry = self
            .entries()
            .set_public(id, user_id, is_public)
            .await?
            .ok_or_else(|| DepotError::NotFound("file".to_string()))?;

        info!(
            file_id = id,
            user_id = user_id,
            is_public = is_public,
            "File visibility updated"
        );
        Ok(entry)
    }

    /// Fetch an entry's content for a caller, optionally at a size
    /// variant.
    ///
    /// Denied reads and missing entries are both reported as not
    /// found, so callers cannot probe for hidden entries. Folders are
    /// rejected since they carry no content.
    pub async fn fetch_content(
        &self,
        id: i64,
        caller: Option<i64>,
        size: Option<&str>,
    ) -> Result<(FileEntry, Vec<u8>)> {
        let entry = self
            .entries()
            .get_by_id(id)
            .await?
            .ok_or_else(|| DepotError::NotFound("file".to_string()))?;

        if !access::can_read(&entry, caller) {
            return Err(DepotError::NotFound("file".to_string()));
        }

        if !entry.entry_type.has_content() {
            return Err(DepotError::Validation(
                "A folder doesn't have content".to_string(),
            ));
        }

        let path = entry
            .local_path
            .clone()
            .ok_or_else(|| DepotError::NotFound("file".to_string()))?;

        let bytes = self.blobs.read(&path, size)?;
        Ok((entry, bytes))
    }

    /// Count stored entries.
    pub async fn count(&self) -> Result<i64> {
        self.entries().count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, NewUser, UserRepository};
    use crate::file::metadata::EntryType;
    use serde_json::json;

    struct Fixture {
        db: Database,
        blobs: BlobStore,
        _dir: tempfile::TempDir,
        user_id: i64,
    }

    async fn setup() -> Fixture {
        let db = Database::open_in_memory().await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let blobs = BlobStore::new(dir.path());
        let user = UserRepository::new(db.pool())
            .create(&NewUser::new("owner@example.com", "hash"))
            .await
            .unwrap();
        Fixture {
            db,
            blobs,
            _dir: dir,
            user_id: user.id,
        }
    }

    fn file_request(name: &str, data: &str) -> CreateRequest {
        serde_json::from_value(json!({ "name": name, "type": "file", "data": data })).unwrap()
    }

    fn folder_request(name: &str) -> CreateRequest {
        serde_json::from_value(json!({ "name": name, "type": "folder" })).unwrap()
    }

    #[tokio::test]
    async fn test_create_folder_then_file() {
        let fx = setup().await;
        let service = FileService::new(fx.db.pool(), &fx.blobs);

        let folder = service
            .create(fx.user_id, &folder_request("docs"))
            .await
            .unwrap();
        assert_eq!(folder.entry_type, EntryType::Folder);
        assert_eq!(folder.parent, ParentRef::Root);
        assert!(!folder.is_public);
        assert!(folder.local_path.is_none());

        let mut request = file_request("a.txt", "aGVsbG8=");
        request.parent_id = Some(json!(folder.id));
        let file = service.create(fx.user_id, &request).await.unwrap();

        assert_eq!(file.parent, ParentRef::Folder(folder.id));
        let path = file.local_path.as_deref().unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_create_validation_failure_writes_nothing() {
        let fx = setup().await;
        let service = FileService::new(fx.db.pool(), &fx.blobs);

        let request = CreateRequest {
            entry_type: Some("file".to_string()),
            data: Some("aGVsbG8=".to_string()),
            ..Default::default()
        };
        let err = service.create(fx.user_id, &request).await.unwrap_err();

        assert!(matches!(err, DepotError::Validation(msg) if msg == "Missing name"));
        assert_eq!(service.count().await.unwrap(), 0);
        // Blob root untouched, not even created
        assert!(std::fs::read_dir(fx.blobs.root()).is_err() || std::fs::read_dir(fx.blobs.root()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_undecodable_data() {
        let fx = setup().await;
        let service = FileService::new(fx.db.pool(), &fx.blobs);

        let err = service
            .create(fx.user_id, &file_request("a.txt", "%%%not-base64%%%"))
            .await
            .unwrap_err();
        assert!(matches!(err, DepotError::Validation(msg) if msg == "Missing data"));
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_fetch_content_round_trip() {
        let fx = setup().await;
        let service = FileService::new(fx.db.pool(), &fx.blobs);

        let file = service
            .create(fx.user_id, &file_request("a.txt", "aGVsbG8="))
            .await
            .unwrap();

        let (entry, bytes) = service
            .fetch_content(file.id, Some(fx.user_id), None)
            .await
            .unwrap();
        assert_eq!(entry.name, "a.txt");
        assert_eq!(bytes, b"hello");
    }

    #[tokio::test]
    async fn test_fetch_content_conceals_private_entries() {
        let fx = setup().await;
        let service = FileService::new(fx.db.pool(), &fx.blobs);

        let file = service
            .create(fx.user_id, &file_request("a.txt", "aGVsbG8="))
            .await
            .unwrap();

        // Other users and anonymous callers see the same not-found
        for caller in [Some(fx.user_id + 1), None] {
            let err = service.fetch_content(file.id, caller, None).await.unwrap_err();
            assert!(matches!(err, DepotError::NotFound(_)));
        }

        // Publishing opens it up to everyone
        service
            .set_visibility(file.id, fx.user_id, true)
            .await
            .unwrap();
        let (_, bytes) = service.fetch_content(file.id, None, None).await.unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[tokio::test]
    async fn test_fetch_content_rejects_folders() {
        let fx = setup().await;
        let service = FileService::new(fx.db.pool(), &fx.blobs);

        let folder = service
            .create(fx.user_id, &folder_request("docs"))
            .await
            .unwrap();
        let err = service
            .fetch_content(folder.id, Some(fx.user_id), None)
            .await
            .unwrap_err();

        assert!(matches!(err, DepotError::Validation(msg) if msg == "A folder doesn't have content"));
    }

    #[tokio::test]
    async fn test_fetch_content_missing_blob_is_not_found() {
        let fx = setup().await;
        let service = FileService::new(fx.db.pool(), &fx.blobs);

        let file = service
            .create(fx.user_id, &file_request("a.txt", "aGVsbG8="))
            .await
            .unwrap();
        std::fs::remove_file(file.local_path.as_deref().unwrap()).unwrap();

        let err = service
            .fetch_content(file.id, Some(fx.user_id), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DepotError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_set_visibility_idempotent() {
        let fx = setup().await;
        let service = FileService::new(fx.db.pool(), &fx.blobs);

        let file = service
            .create(fx.user_id, &file_request("a.txt", "aGVsbG8="))
            .await
            .unwrap();

        let once = service
            .set_visibility(file.id, fx.user_id, true)
            .await
            .unwrap();
        let twice = service
            .set_visibility(file.id, fx.user_id, true)
            .await
            .unwrap();
        assert!(once.is_public);
        assert!(twice.is_public);

        let back = service
            .set_visibility(file.id, fx.user_id, false)
            .await
            .unwrap();
        assert!(!back.is_public);
    }

    #[tokio::test]
    async fn test_set_visibility_owner_only() {
        let fx = setup().await;
        let service = FileService::new(fx.db.pool(), &fx.blobs);

        let file = service
            .create(fx.user_id, &file_request("a.txt", "aGVsbG8="))
            .await
            .unwrap();
        let err = service
            .set_visibility(file.id, fx.user_id + 1, true)
            .await
            .unwrap_err();

        assert!(matches!(err, DepotError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_owned() {
        let fx = setup().await;
        let service = FileService::new(fx.db.pool(), &fx.blobs);

        let file = service
            .create(fx.user_id, &file_request("a.txt", "aGVsbG8="))
            .await
            .unwrap();

        let fetched = service.get_owned(file.id, fx.user_id).await.unwrap();
        assert_eq!(fetched.id, file.id);

        let err = service.get_owned(file.id, fx.user_id + 1).await.unwrap_err();
        assert!(matches!(err, DepotError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_children() {
        let fx = setup().await;
        let service = FileService::new(fx.db.pool(), &fx.blobs);

        let folder = service
            .create(fx.user_id, &folder_request("docs"))
            .await
            .unwrap();
        let mut request = file_request("a.txt", "aGVsbG8=");
        request.parent_id = Some(json!(folder.id));
        service.create(fx.user_id, &request).await.unwrap();

        let children = service
            .list_children(fx.user_id, ParentRef::Folder(folder.id), 0)
            .await
            .unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "a.txt");

        let roots = service
            .list_children(fx.user_id, ParentRef::Root, 0)
            .await
            .unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].name, "docs");
    }
}
