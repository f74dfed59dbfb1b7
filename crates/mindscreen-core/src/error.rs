//! Error types for bank loading, graph navigation, and the assessment service.
//!
//! Bank and navigation failures are typed so callers (route handlers, the CLI)
//! can map them to their own status codes without string matching.

use thiserror::Error;

use crate::model::Tier;

/// Errors raised while loading a question bank.
#[derive(Debug, Error)]
pub enum BankError {
    /// No bank exists for the test type, or its source could not be read.
    #[error("question bank not found: {test_type}")]
    NotFound { test_type: String },

    /// The bank exists but declares no questions.
    #[error("question bank is empty: {test_type}")]
    EmptyBank { test_type: String },

    /// The bank source could not be parsed into valid question nodes.
    #[error("malformed question bank '{test_type}': {reason}")]
    Malformed { test_type: String, reason: String },
}

impl BankError {
    pub(crate) fn not_found(test_type: &str) -> Self {
        BankError::NotFound {
            test_type: test_type.to_string(),
        }
    }

    pub(crate) fn malformed(test_type: &str, reason: impl Into<String>) -> Self {
        BankError::Malformed {
            test_type: test_type.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for every variant a caller should report as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BankError::NotFound { .. } | BankError::EmptyBank { .. }
        )
    }
}

/// Why a single navigation step could not produce a next node.
///
/// At the collapsed boundary (`Resolver::next_question`) all of these become
/// an absent result; `Resolver::resolve_next` keeps them apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// `current_id` does not name a node in the bank.
    #[error("unknown question id: {question_id}")]
    UnknownQuestion { question_id: String },

    /// The answer is not a key of the question's severity map.
    #[error("invalid answer '{answer}' for question {question_id}")]
    InvalidAnswer { question_id: String, answer: String },

    /// The question declares no edge for the resolved tier.
    #[error("question {question_id} has no '{tier}' edge")]
    MissingEdge { question_id: String, tier: Tier },

    /// The edge points at an id that is not in the bank.
    #[error("question {question_id} '{tier}' edge points at missing question {target}")]
    DanglingEdge {
        question_id: String,
        tier: Tier,
        target: String,
    },
}

/// Either failure of an explicit navigation step.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Bank(#[from] BankError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// Errors surfaced by `AssessmentService`.
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Bank(#[from] BankError),

    /// A required request field was empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The result store failed.
    #[error("result store error: {0:#}")]
    Store(#[from] anyhow::Error),
}
