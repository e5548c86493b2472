//! Result of validating a learner's code submission.

use serde::{Deserialize, Serialize};

/// Outcome reported by the code editor's validator.
///
/// Only `success` drives progress; the rest is feedback for the learner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Whether the submission passed
    pub success: bool,

    /// Summary message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Validation errors
    #[serde(default)]
    pub errors: Vec<String>,

    /// Hints for the learner
    #[serde(default)]
    pub hints: Vec<String>,
}

impl ValidationOutcome {
    /// A passing outcome.
    pub fn passed(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// A failing outcome with errors.
    pub fn failed(errors: Vec<String>) -> Self {
        Self {
            success: false,
            errors,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_payload() {
        let outcome: ValidationOutcome = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(outcome.success);
        assert!(outcome.message.is_none());
        assert!(outcome.errors.is_empty());
    }
}
