//! Local roster over a blob-backed record store

use async_trait::async_trait;
use tokio::sync::Mutex;
use crate::outcome::Outcome;
use crate::storage::{BlobStore, RecordStore};
use crate::student::{StudentPatch, StudentRecord};
use super::{ADDED, DELETED, Roster, UPDATED};

pub struct LocalRoster<B> {
    store: Mutex<RecordStore<B>>,
}

impl<B: BlobStore> LocalRoster<B> {
    pub fn new(store: RecordStore<B>) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    pub fn into_inner(self) -> RecordStore<B> {
        self.store.into_inner()
    }
}

#[async_trait]
impl<B: BlobStore + Send> Roster for LocalRoster<B> {
    async fn load(&self) -> Vec<StudentRecord> {
        self.store.lock().await.load()
    }

    async fn add(&self, student: StudentRecord) -> Outcome {
        let roll = student.roll.clone();
        let result = self.store.lock().await.add(student);
        if let Err(e) = &result {
            tracing::debug!("Add of {} rejected: {}", roll, e);
        }
        Outcome::from_result(result, ADDED)
    }

    async fn find(&self, roll: &str) -> Option<StudentRecord> {
        self.store.lock().await.find(roll)
    }

    async fn update(&self, roll: &str, patch: StudentPatch) -> Outcome {
        let result = self.store.lock().await.update(roll, &patch);
        Outcome::from_result(result, UPDATED)
    }

    async fn remove(&self, roll: &str) -> Outcome {
        let result = self.store.lock().await.remove(roll);
        Outcome::from_result(result, DELETED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteBlobStore;

    fn roster() -> LocalRoster<SqliteBlobStore> {
        LocalRoster::new(RecordStore::new(SqliteBlobStore::open_in_memory().unwrap()))
    }

    #[tokio::test]
    async fn test_outcome_messages() {
        let roster = roster();
        let student = StudentRecord::new("A1", "Meera", "20", "CS", "80");

        assert_eq!(roster.add(student.clone()).await, Outcome::ok(ADDED));
        assert_eq!(
            roster.add(student).await,
            Outcome::fail("Roll number already exists!")
        );
        assert_eq!(
            roster.update("A1", StudentPatch::marks("95")).await,
            Outcome::ok(UPDATED)
        );
        assert_eq!(roster.remove("A1").await, Outcome::ok(DELETED));
        assert_eq!(roster.remove("A1").await, Outcome::fail("Student not found!"));
        assert!(roster.find("A1").await.is_none());
    }

    #[tokio::test]
    async fn test_search_and_stats_use_current_snapshot() {
        let roster = roster();
        roster.add(StudentRecord::new("A1", "Meera", "20", "CS", "80")).await;
        roster.add(StudentRecord::new("A2", "Kabir", "21", "EE", "60")).await;

        let hits = roster.search("a1").await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].roll, "A1");

        let stats = roster.stats().await;
        assert_eq!(stats.total, 2);
        assert_eq!(stats.average_marks, 70);
        assert_eq!(stats.top_marks, 80);
        assert_eq!(stats.distinct_branches, 2);

        roster.update("A2", StudentPatch::marks("100")).await;
        assert_eq!(roster.stats().await.top_marks, 100);
    }

    #[tokio::test]
    async fn test_into_inner_keeps_data() {
        let roster = roster();
        roster.add(StudentRecord::new("A1", "Meera", "20", "CS", "80")).await;

        let store = roster.into_inner();
        assert_eq!(store.load().len(), 1);
    }
}
