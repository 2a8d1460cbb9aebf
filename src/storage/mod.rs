//! Storage Layer - whole-collection blob persistence
//!
//! The roster is persisted as a single named blob holding the JSON
//! collection. Backends only move that blob; the record store owns
//! encoding, uniqueness and the read-modify-write cycle.
//! - `JsonFileStore`: one pretty-printed JSON file
//! - `SqliteBlobStore`: `blobs(name, data)` table, one row per blob name

pub mod schema;
pub mod sqlite;
pub mod json_file;
pub mod record_store;

pub use sqlite::SqliteBlobStore;
pub use json_file::JsonFileStore;
pub use record_store::RecordStore;

use std::path::Path;
use crate::config::Backend;
use crate::{Error, Result};

/// A named blob that is read and overwritten wholesale.
pub trait BlobStore {
    /// Current blob contents, `None` if nothing has been written yet
    fn read(&self) -> Result<Option<String>>;

    /// Replace the blob contents
    fn write(&self, data: &str) -> Result<()>;
}

impl<B: BlobStore + ?Sized> BlobStore for Box<B> {
    fn read(&self) -> Result<Option<String>> {
        (**self).read()
    }

    fn write(&self, data: &str) -> Result<()> {
        (**self).write(data)
    }
}

/// Open the blob backend for a local storage kind
pub fn open_blob_store(backend: Backend, path: &Path) -> Result<Box<dyn BlobStore + Send>> {
    match backend {
        Backend::Json => Ok(Box::new(JsonFileStore::new(path))),
        Backend::Sqlite => Ok(Box::new(SqliteBlobStore::open(path)?)),
        Backend::Remote => Err(Error::StorageUnavailable(
            "the remote backend has no local blob".to_string(),
        )),
    }
}
