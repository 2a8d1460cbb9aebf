//! Database schema definitions

/// SQL to create the blobs table
///
/// Each row is one named blob; the roster lives under a single name.
pub const CREATE_BLOBS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS blobs (
    name TEXT PRIMARY KEY,
    data TEXT NOT NULL
)
"#;

/// Name under which the roster collection is stored
pub const STUDENTS_BLOB: &str = "students_data";

/// Get all schema creation statements
pub fn all_schema_statements() -> &'static [&'static str] {
    &[CREATE_BLOBS_TABLE]
}
