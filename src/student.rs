//! Student records - the single persisted entity
//!
//! Every field is kept as text, the way the roster has always stored it.
//! `marks` is only interpreted numerically by the stats layer.

use serde::{Deserialize, Deserializer, Serialize};

/// A student in the roster, keyed by `roll`.
///
/// `roll` is the identity of the record and never changes after the
/// record has been added.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub roll: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub age: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub branch: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub marks: String,
}

impl StudentRecord {
    pub fn new(
        roll: impl Into<String>,
        name: impl Into<String>,
        age: impl Into<String>,
        branch: impl Into<String>,
        marks: impl Into<String>,
    ) -> Self {
        Self {
            roll: roll.into(),
            name: name.into(),
            age: age.into(),
            branch: branch.into(),
            marks: marks.into(),
        }
    }

    /// Shallow-merge a patch over this record. `roll` is left alone.
    pub fn apply(&mut self, patch: &StudentPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(age) = &patch.age {
            self.age = age.clone();
        }
        if let Some(branch) = &patch.branch {
            self.branch = branch.clone();
        }
        if let Some(marks) = &patch.marks {
            self.marks = marks.clone();
        }
    }
}

/// Partial update of a student. Absent fields keep their stored value.
///
/// A `roll` key in an incoming body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StudentPatch {
    #[serde(default, deserialize_with = "lenient_opt_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_text", skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_text", skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_text", skip_serializing_if = "Option::is_none")]
    pub marks: Option<String>,
}

impl StudentPatch {
    pub fn marks(marks: impl Into<String>) -> Self {
        Self {
            marks: Some(marks.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.branch.is_none() && self.marks.is_none()
    }
}

/// Older data files hold `null` for fields that were never filled in, and
/// clients sometimes send `age`/`marks` as JSON numbers.
fn value_to_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value_to_text(value).unwrap_or_default())
}

fn lenient_opt_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value_to_text(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_patch_keeps_roll() {
        let mut student = StudentRecord::new("A1", "Asha", "20", "CS", "80");
        student.apply(&StudentPatch::marks("90"));

        assert_eq!(student.roll, "A1");
        assert_eq!(student.marks, "90");
        assert_eq!(student.name, "Asha");
        assert_eq!(student.branch, "CS");
    }

    #[test]
    fn test_lenient_fields() {
        let json = r#"{"roll": "A7", "name": null, "age": 19, "marks": 88.5}"#;
        let student: StudentRecord = serde_json::from_str(json).unwrap();

        assert_eq!(student.roll, "A7");
        assert_eq!(student.name, "");
        assert_eq!(student.age, "19");
        assert_eq!(student.branch, "");
        assert_eq!(student.marks, "88.5");
    }

    #[test]
    fn test_patch_ignores_roll_and_nulls() {
        let json = r#"{"roll": "B2", "name": "Ravi", "branch": null}"#;
        let patch: StudentPatch = serde_json::from_str(json).unwrap();

        assert_eq!(patch.name.as_deref(), Some("Ravi"));
        assert!(patch.branch.is_none());
        assert!(!patch.is_empty());

        let body = serde_json::to_value(&patch).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Ravi"}));
    }
}
