//! SQLite blob storage

use std::path::Path;
use rusqlite::{Connection, OptionalExtension, params};
use crate::Result;
use super::schema;
use super::BlobStore;

/// SQLite-backed named blob, the on-disk stand-in for a browser's local storage key
pub struct SqliteBlobStore {
    conn: Connection,
    name: String,
}

impl SqliteBlobStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn,
            name: schema::STUDENTS_BLOB.to_string(),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Store under a different blob name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }
}

impl BlobStore for SqliteBlobStore {
    fn read(&self) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT data FROM blobs WHERE name = ?1",
                [&self.name],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    fn write(&self, data: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO blobs (name, data) VALUES (?1, ?2)",
            params![self.name, data],
        )?;
        Ok(())
    }
}
