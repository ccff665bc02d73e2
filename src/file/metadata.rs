//! File entry types and metadata repository for filedepot.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::{DepotError, Result};

/// Number of entries returned per listing page.
pub const PAGE_SIZE: i64 = 20;

/// Kind of a file entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Regular file with blob content.
    File,
    /// Image file with blob content.
    Image,
    /// Folder; carries no content.
    Folder,
}

impl EntryType {
    /// Convert to the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::File => "file",
            EntryType::Image => "image",
            EntryType::Folder => "folder",
        }
    }

    /// Whether entries of this type carry blob content.
    pub fn has_content(&self) -> bool {
        !matches!(self, EntryType::Folder)
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "file" => Ok(EntryType::File),
            "image" => Ok(EntryType::Image),
            "folder" => Ok(EntryType::Folder),
            _ => Err(format!("unknown entry type: {s}")),
        }
    }
}

/// Reference to an entry's parent.
///
/// The database stores the sentinel id 0 for root; in code the
/// distinction is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParentRef {
    /// Top-level entry with no parent folder.
    #[default]
    Root,
    /// Child of the folder with the given id.
    Folder(i64),
}

impl ParentRef {
    /// Convert to the database representation (0 = root).
    pub fn as_id(&self) -> i64 {
        match self {
            ParentRef::Root => 0,
            ParentRef::Folder(id) => *id,
        }
    }

    /// Build from the database representation.
    pub fn from_id(id: i64) -> Self {
        if id == 0 {
            ParentRef::Root
        } else {
            ParentRef::Folder(id)
        }
    }
}

/// A file, image, or folder entry.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Unique entry ID, assigned by the store.
    pub id: i64,
    /// Owning user's id; immutable.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// Entry kind.
    pub entry_type: EntryType,
    /// Whether the entry is readable by anyone.
    pub is_public: bool,
    /// Parent folder reference.
    pub parent: ParentRef,
    /// On-disk blob location; present iff the entry carries content.
    /// Never exposed to clients.
    pub local_path: Option<String>,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
}

impl<'r> sqlx::FromRow<'r, SqliteRow> for FileEntry {
    fn from_row(row: &'r SqliteRow) -> std::result::Result<Self, sqlx::Error> {
        let entry_type: String = row.try_get("entry_type")?;
        let entry_type = EntryType::from_str(&entry_type).map_err(|e| sqlx::Error::Decode(e.into()))?;

        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            name: row.try_get("name")?,
            entry_type,
            is_public: row.try_get("is_public")?,
            parent: ParentRef::from_id(row.try_get("parent_id")?),
            local_path: row.try_get("local_path")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Data for creating a new entry.
#[derive(Debug, Clone)]
pub struct NewEntry {
    /// Owning user's id.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// Entry kind.
    pub entry_type: EntryType,
    /// Initial visibility.
    pub is_public: bool,
    /// Parent folder reference.
    pub parent: ParentRef,
    /// Blob location for content-bearing entries.
    pub local_path: Option<String>,
}

const SELECT_COLUMNS: &str =
    "id, user_id, name, entry_type, is_public, parent_id, local_path, created_at";

/// Repository for file entry metadata.
///
/// Pure persistence access; hierarchy and visibility rules live in the
/// validation and service layers.
pub struct FileEntryRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FileEntryRepository<'a> {
    /// Create a new FileEntryRepository with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get an entry by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<FileEntry>> {
        let entry = sqlx::query_as::<_, FileEntry>(&format!(
            "SELECT {SELECT_COLUMNS} FROM files WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(entry)
    }

    /// Get an entry by ID, scoped to an owner.
    ///
    /// Returns None both for missing ids and for entries owned by
    /// someone else; callers cannot distinguish the two.
    pub async fn get_by_id_for_owner(&self, id: i64, user_id: i64) -> Result<Option<FileEntry>> {
        let entry = sqlx::query_as::<_, FileEntry>(&format!(
            "SELECT {SELECT_COLUMNS} FROM files WHERE id = ? AND user_id = ?"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(entry)
    }

    /// List a user's entries under a parent, paged by [`PAGE_SIZE`].
    pub async fn list_children(
        &self,
        user_id: i64,
        parent: ParentRef,
        page: i64,
    ) -> Result<Vec<FileEntry>> {
        let page = page.max(0);
        let entries = sqlx::query_as::<_, FileEntry>(&format!(
            "SELECT {SELECT_COLUMNS} FROM files WHERE user_id = ? AND parent_id = ?
             ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(user_id)
        .bind(parent.as_id())
        .bind(PAGE_SIZE)
        .bind(page.saturating_mul(PAGE_SIZE))
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }

    /// Insert a new entry.
    ///
    /// Returns the stored entry with its assigned id.
    pub async fn insert(&self, entry: &NewEntry) -> Result<FileEntry> {
        let result = sqlx::query(
            "INSERT INTO files (user_id, name, entry_type, is_public, parent_id, local_path)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(entry.user_id)
        .bind(&entry.name)
        .bind(entry.entry_type.as_str())
        .bind(entry.is_public)
        .bind(entry.parent.as_id())
        .bind(&entry.local_path)
        .execute(self.pool)
        .await
        .map_err(|e| DepotError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DepotError::NotFound("file".to_string()))
    }

    /// Update an entry's visibility flag, scoped to its owner.
    ///
    /// Returns the post-update entry, or None if no owned entry
    /// matched.
    pub async fn set_public(
        &self,
        id: i64,
        user_id: i64,
        is_public: bool,
    ) -> Result<Option<FileEntry>> {
        let result = sqlx::query("UPDATE files SET is_public = ? WHERE id = ? AND user_id = ?")
            .bind(is_public)
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Count stored entries.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
