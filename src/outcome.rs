//! Uniform `{success, message}` result handed to callers of the roster

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
}

impl Outcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// Collapse a store result into an outcome. Errors keep their display
    /// text, which for the keyed errors is the user-facing message.
    pub fn from_result<T>(result: crate::Result<T>, success_message: &str) -> Self {
        match result {
            Ok(_) => Self::ok(success_message),
            Err(e) => Self::fail(e.to_string()),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_from_result_messages() {
        let dup: crate::Result<()> = Err(Error::DuplicateKey("A1".into()));
        let outcome = Outcome::from_result(dup, "Student added successfully!");
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Roll number already exists!");

        let missing: crate::Result<()> = Err(Error::NotFound("Z9".into()));
        assert_eq!(Outcome::from_result(missing, "").message, "Student not found!");

        let ok = Outcome::from_result(Ok(()), "Student deleted successfully!");
        assert_eq!(ok, Outcome::ok("Student deleted successfully!"));
    }
}
