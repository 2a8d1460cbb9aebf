//! # Rollbook - Student Roster Manager
//!
//! Keyed student records with search and aggregate statistics.
//!
//! Rollbook provides:
//! - A record store keyed by roll number over a whole-collection blob
//! - Interchangeable blob backends (JSON file, SQLite)
//! - Case-insensitive search and roster statistics
//! - A `Roster` contract with local and remote (HTTP API) variants
//! - An axum server exposing the roster as a JSON API

pub mod student;
pub mod outcome;
pub mod storage;
pub mod query;
pub mod roster;
pub mod server;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use student::{StudentPatch, StudentRecord};
pub use outcome::Outcome;
pub use storage::{BlobStore, JsonFileStore, RecordStore, SqliteBlobStore};
pub use query::{MarksBand, RosterStats};
pub use roster::{LocalRoster, RemoteRoster, Roster};

/// Result type alias for Rollbook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Rollbook operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Roll number already exists!")]
    DuplicateKey(String),

    #[error("Student not found!")]
    NotFound(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}
