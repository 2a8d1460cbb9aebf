//! Substring search over name, roll and branch

use crate::student::StudentRecord;

/// Case-insensitive substring match against `name`, `roll` and `branch`.
///
/// The query is trimmed first; a blank query returns every student.
/// Matches keep their collection order.
pub fn search(students: &[StudentRecord], query: &str) -> Vec<StudentRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return students.to_vec();
    }

    students
        .iter()
        .filter(|s| {
            s.name.to_lowercase().contains(&needle)
                || s.roll.to_lowercase().contains(&needle)
                || s.branch.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
