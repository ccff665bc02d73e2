//! Database schema migrations for filedepot.
//!
//! Each entry is a SQL batch applied in order; the current version is
//! tracked in the `schema_version` table.

/// Ordered list of schema migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users and files
    "CREATE TABLE users (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        email       TEXT NOT NULL UNIQUE,
        password    TEXT NOT NULL,
        created_at  TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE files (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id     INTEGER NOT NULL REFERENCES users(id),
        name        TEXT NOT NULL,
        entry_type  TEXT NOT NULL CHECK (entry_type IN ('file', 'image', 'folder')),
        is_public   INTEGER NOT NULL DEFAULT 0,
        parent_id   INTEGER NOT NULL DEFAULT 0,
        local_path  TEXT,
        created_at  TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE INDEX idx_files_parent ON files(parent_id);
    CREATE INDEX idx_files_owner ON files(user_id);",
];
