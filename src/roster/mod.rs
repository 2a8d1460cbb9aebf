//! Roster - the contract the presentation side talks to
//!
//! Both variants return plain data or an [`Outcome`]; nothing raises:
//! - `LocalRoster`: a `RecordStore` over a local blob backend
//! - `RemoteRoster`: the same operations against the HTTP API

pub mod local;
pub mod remote;

pub use local::LocalRoster;
pub use remote::RemoteRoster;

use async_trait::async_trait;
use crate::config::{Backend, Settings};
use crate::outcome::Outcome;
use crate::query::{self, RosterStats};
use crate::storage::{RecordStore, open_blob_store};
use crate::student::{StudentPatch, StudentRecord};

pub const ADDED: &str = "Student added successfully!";
pub const UPDATED: &str = "Student updated successfully!";
pub const DELETED: &str = "Student deleted successfully!";

#[async_trait]
pub trait Roster: Send + Sync {
    /// Every student, in insertion order. Empty when storage is unavailable.
    async fn load(&self) -> Vec<StudentRecord>;

    async fn add(&self, student: StudentRecord) -> Outcome;

    async fn find(&self, roll: &str) -> Option<StudentRecord>;

    async fn update(&self, roll: &str, patch: StudentPatch) -> Outcome;

    async fn remove(&self, roll: &str) -> Outcome;

    async fn search(&self, query: &str) -> Vec<StudentRecord> {
        query::search(&self.load().await, query)
    }

    async fn stats(&self) -> RosterStats {
        query::stats(&self.load().await)
    }
}

/// Open the roster variant the settings ask for
pub fn open_roster(settings: &Settings) -> crate::Result<Box<dyn Roster>> {
    match settings.backend {
        Backend::Remote => Ok(Box::new(RemoteRoster::new(&settings.api_url, settings.timeout)?)),
        backend => {
            let blobs = open_blob_store(backend, &settings.path)?;
            Ok(Box::new(LocalRoster::new(RecordStore::new(blobs))))
        }
    }
}
