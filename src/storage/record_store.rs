//! Record store - keyed CRUD over the whole-collection blob
//!
//! Every mutation is a full cycle: load the collection, change it, save
//! all of it back. Nothing is locked in between, so two writers racing on
//! the same blob can both pass the uniqueness check and the later save
//! silently wins. Callers that share a store across tasks serialize access
//! themselves (the HTTP server holds it behind one mutex).

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use crate::student::{StudentPatch, StudentRecord};
use crate::{Error, Result};
use super::BlobStore;

pub struct RecordStore<B> {
    backend: B,
}

impl<B: BlobStore> RecordStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load the collection, or an empty one if the blob is missing,
    /// unreadable or corrupt. Never fails.
    pub fn load(&self) -> Vec<StudentRecord> {
        match self.try_load() {
            Ok(students) => students,
            Err(e) => {
                tracing::warn!("Failed to load students, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Load the collection, surfacing read and decode failures
    pub fn try_load(&self) -> Result<Vec<StudentRecord>> {
        match self.backend.read()? {
            Some(data) if !data.trim().is_empty() => Ok(serde_json::from_str(&data)?),
            _ => Ok(Vec::new()),
        }
    }

    /// Strict load for mutations: a blob that cannot be read or decoded must
    /// not be replaced by a save built on an empty collection.
    fn load_for_write(&self) -> Result<Vec<StudentRecord>> {
        self.try_load().map_err(|e| {
            tracing::error!("Refusing to modify unreadable roster: {}", e);
            Error::StorageUnavailable(e.to_string())
        })
    }

    /// Persist the full collection, overwriting what was there
    pub fn save(&self, students: &[StudentRecord]) -> Result<()> {
        let data = encode(students)?;
        self.backend
            .write(&data)
            .map_err(|e| Error::StorageUnavailable(e.to_string()))?;
        tracing::debug!("Saved {} students", students.len());
        Ok(())
    }

    /// Append a student unless its roll is already taken
    pub fn add(&self, student: StudentRecord) -> Result<()> {
        let mut students = self.load_for_write()?;
        if students.iter().any(|s| s.roll == student.roll) {
            return Err(Error::DuplicateKey(student.roll));
        }
        students.push(student);
        self.save(&students)
    }

    /// Exact match on roll
    pub fn find(&self, roll: &str) -> Option<StudentRecord> {
        self.load().into_iter().find(|s| s.roll == roll)
    }

    /// Merge `patch` over the student with this roll and return the result
    pub fn update(&self, roll: &str, patch: &StudentPatch) -> Result<StudentRecord> {
        let mut students = self.load_for_write()?;
        let student = students
            .iter_mut()
            .find(|s| s.roll == roll)
            .ok_or_else(|| Error::NotFound(roll.to_string()))?;
        student.apply(patch);
        let updated = student.clone();
        self.save(&students)?;
        Ok(updated)
    }

    /// Drop the student with this roll and return it
    pub fn remove(&self, roll: &str) -> Result<StudentRecord> {
        let mut students = self.load_for_write()?;
        let index = students
            .iter()
            .position(|s| s.roll == roll)
            .ok_or_else(|| Error::NotFound(roll.to_string()))?;
        let removed = students.remove(index);
        self.save(&students)?;
        Ok(removed)
    }
}

/// Pretty JSON with a four-space indent, matching the files the roster
/// has always written.
fn encode(students: &[StudentRecord]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    students.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| Error::StorageUnavailable(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonFileStore, SqliteBlobStore};

    /// Backend that refuses every write
    struct ReadOnlyBlob(Option<String>);

    impl BlobStore for ReadOnlyBlob {
        fn read(&self) -> Result<Option<String>> {
            Ok(self.0.clone())
        }

        fn write(&self, _data: &str) -> Result<()> {
            Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    fn store() -> RecordStore<SqliteBlobStore> {
        RecordStore::new(SqliteBlobStore::open_in_memory().unwrap())
    }

    fn student(roll: &str, marks: &str, branch: &str) -> StudentRecord {
        StudentRecord::new(roll, format!("Student {}", roll), "20", branch, marks)
    }

    #[test]
    fn test_add_then_find() {
        let store = store();
        store.add(student("A1", "80", "CS")).unwrap();

        let found = store.find("A1").unwrap();
        assert_eq!(found.marks, "80");
        assert_eq!(store.load().iter().filter(|s| s.roll == "A1").count(), 1);
    }

    #[test]
    fn test_duplicate_add_leaves_blob_untouched() {
        let store = store();
        store.add(student("A1", "80", "CS")).unwrap();
        let before = store.backend().read().unwrap();

        let err = store.add(student("A1", "10", "EE")).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(ref roll) if roll == "A1"));
        assert_eq!(err.to_string(), "Roll number already exists!");

        assert_eq!(store.backend().read().unwrap(), before);
        assert_eq!(store.find("A1").unwrap().marks, "80");
    }

    #[test]
    fn test_missing_roll_update_and_remove() {
        let store = store();
        store.add(student("A1", "80", "CS")).unwrap();
        let before = store.load();

        let err = store.update("Z9", &StudentPatch::marks("1")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        let err = store.remove("Z9").unwrap_err();
        assert_eq!(err.to_string(), "Student not found!");

        assert_eq!(store.load(), before);
    }

    #[test]
    fn test_update_only_touches_patched_fields() {
        let store = store();
        store.add(student("A1", "80", "CS")).unwrap();

        let updated = store.update("A1", &StudentPatch::marks("90")).unwrap();
        assert_eq!(updated.roll, "A1");
        assert_eq!(updated.marks, "90");

        let stored = store.find("A1").unwrap();
        assert_eq!(stored, StudentRecord { marks: "90".into(), ..student("A1", "80", "CS") });
    }

    #[test]
    fn test_remove_then_find() {
        let store = store();
        store.add(student("A1", "80", "CS")).unwrap();
        store.add(student("A2", "60", "EE")).unwrap();

        let removed = store.remove("A1").unwrap();
        assert_eq!(removed.roll, "A1");
        assert!(store.find("A1").is_none());
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_insertion_order_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.json");
        let store = RecordStore::new(JsonFileStore::new(&path));
        for roll in ["C3", "A1", "B2"] {
            store.add(student(roll, "50", "ME")).unwrap();
        }

        let reopened = RecordStore::new(JsonFileStore::new(&path));
        let rolls: Vec<_> = reopened.load().into_iter().map(|s| s.roll).collect();
        assert_eq!(rolls, vec!["C3", "A1", "B2"]);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n        \"roll\": \"C3\""));
    }

    #[test]
    fn test_save_of_load_is_idempotent() {
        let store = store();
        store.add(student("A1", "80", "CS")).unwrap();
        store.add(student("A2", "60", "EE")).unwrap();
        let before = store.backend().read().unwrap();

        store.save(&store.load()).unwrap();

        assert_eq!(store.backend().read().unwrap(), before);
    }

    #[test]
    fn test_corrupt_blob_loads_empty() {
        let store = store();
        store.backend().write("{not json").unwrap();

        assert!(store.load().is_empty());
        assert!(matches!(store.try_load(), Err(Error::Json(_))));
    }

    #[test]
    fn test_corrupt_blob_refuses_mutations() {
        let store = store();
        let truncated = r#"[{"roll":"A1","name":"Asha","age":"20","branch":"CS","marks":"80"},{"roll":"A2""#;
        store.backend().write(truncated).unwrap();

        let err = store.add(student("B1", "70", "EE")).unwrap_err();
        assert!(matches!(err, Error::StorageUnavailable(_)));
        let err = store.update("A1", &StudentPatch::marks("90")).unwrap_err();
        assert!(matches!(err, Error::StorageUnavailable(_)));
        let err = store.remove("A1").unwrap_err();
        assert!(matches!(err, Error::StorageUnavailable(_)));

        assert_eq!(store.backend().read().unwrap().as_deref(), Some(truncated));
    }

    #[test]
    fn test_write_failure_is_storage_unavailable() {
        let store = RecordStore::new(ReadOnlyBlob(None));

        let err = store.add(student("A1", "80", "CS")).unwrap_err();
        assert!(matches!(err, Error::StorageUnavailable(_)));
    }
}
