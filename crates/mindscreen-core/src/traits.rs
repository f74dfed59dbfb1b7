//! Seams to the two external collaborators: where question banks come from,
//! and where submitted results go.
//!
//! Bank sources live in `crate::source`; result stores are implemented by the
//! `mindscreen-store` crate.

use crate::error::BankError;
use crate::model::{AssessmentResult, QuestionBank};

// ---------------------------------------------------------------------------
// Question bank source
// ---------------------------------------------------------------------------

/// Read-only provider of question banks keyed by test type.
pub trait BankSource: Send + Sync {
    /// Load and validate the bank for `test_type`.
    ///
    /// Unknown test types fail with `BankError::NotFound`, unparseable
    /// documents with `BankError::Malformed`.
    fn load(&self, test_type: &str) -> Result<QuestionBank, BankError>;

    /// Test types this source can serve, if it can enumerate them.
    fn test_types(&self) -> Vec<String> {
        Vec::new()
    }
}

// ---------------------------------------------------------------------------
// Result store
// ---------------------------------------------------------------------------

/// Persistence for submitted assessments.
pub trait ResultStore: Send + Sync {
    /// Persist a newly created result.
    fn save(&self, result: &AssessmentResult) -> anyhow::Result<()>;

    /// Past results for a user, newest first.
    fn history(&self, user_id: &str) -> anyhow::Result<Vec<AssessmentResult>>;
}

/// Test types are used as file stems, so only plain identifiers are accepted.
pub fn is_valid_test_type(test_type: &str) -> bool {
    !test_type.is_empty()
        && test_type
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_identifiers() {
        assert!(is_valid_test_type("stress"));
        assert!(is_valid_test_type("phq-9"));
        assert!(is_valid_test_type("gad_7"));
        assert!(!is_valid_test_type(""));
        assert!(!is_valid_test_type("../secrets"));
        assert!(!is_valid_test_type("stress.json"));
        assert!(!is_valid_test_type("two words"));
    }
}
