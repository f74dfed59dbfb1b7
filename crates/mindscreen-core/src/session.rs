//! Caller-side record of one traversal.
//!
//! The resolver keeps no state between calls; whoever drives the traversal
//! keeps an `AnswerTrace` and resubmits the current question each step.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::NavigationError;
use crate::interpret::interpret;
use crate::model::{Interpretation, Question};

/// One answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    pub question_id: String,
    pub answer: String,
    pub severity: i64,
}

/// Ordered answers of a traversal and the running score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerTrace {
    pub test_type: String,
    pub entries: Vec<AnsweredQuestion>,
    pub score: i64,
}

impl AnswerTrace {
    pub fn new(test_type: impl Into<String>) -> Self {
        Self {
            test_type: test_type.into(),
            entries: Vec::new(),
            score: 0,
        }
    }

    /// Record `answer` to `question` and add its severity to the score.
    ///
    /// Returns the severity; an illegal answer leaves the trace unchanged.
    pub fn record(&mut self, question: &Question, answer: &str) -> Result<i64, NavigationError> {
        let severity = question
            .severity(answer)
            .ok_or_else(|| NavigationError::InvalidAnswer {
                question_id: question.id.clone(),
                answer: answer.to_string(),
            })?;

        self.entries.push(AnsweredQuestion {
            question_id: question.id.clone(),
            answer: answer.to_string(),
            severity,
        });
        self.score += severity;
        Ok(severity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Question id to answer label, in the order answered.
    ///
    /// A question answered twice keeps its position and its latest answer.
    pub fn answers(&self) -> IndexMap<String, String> {
        self.entries
            .iter()
            .map(|e| (e.question_id.clone(), e.answer.clone()))
            .collect()
    }

    /// Interpretation of the running score over the distinct questions answered.
    pub fn interpretation(&self) -> Interpretation {
        interpret(self.score, self.answers().len())
    }
}
