//! Core data model types for mindscreen.
//!
//! A question bank is a directed graph: each `Question` maps answer labels to
//! integer severities, and each severity tier points at the next question or
//! at the terminal marker.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BankError;

/// Literal used in bank documents to end a traversal.
pub const END_MARKER: &str = "END";

/// Node keys that would collide with [`PublicQuestion`] fields once the
/// payload is flattened into it.
pub const RESERVED_PAYLOAD_KEYS: &[&str] = &["options", "end"];

/// A single node of a question bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the bank.
    pub id: String,
    /// Prompt shown to the user. Opaque to the resolver.
    #[serde(default, alias = "question", alias = "prompt")]
    pub text: String,
    /// Legal answers and the severity each one carries, in display order.
    pub severity_map: IndexMap<String, i64>,
    /// Where each severity tier leads.
    pub next: Edges,
    /// Any other fields of the node, passed through untouched.
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

impl Question {
    /// Severity carried by `answer`, or `None` if it is not a legal answer.
    pub fn severity(&self, answer: &str) -> Option<i64> {
        self.severity_map.get(answer).copied()
    }

    /// Legal answer labels in declared order.
    pub fn options(&self) -> impl Iterator<Item = &str> {
        self.severity_map.keys().map(String::as_str)
    }

    /// The view of this question that is safe to hand to untrusted callers.
    pub fn to_public(&self) -> PublicQuestion {
        PublicQuestion {
            id: self.id.clone(),
            text: self.text.clone(),
            options: self.options().map(str::to_string).collect(),
            payload: self.payload.clone(),
        }
    }
}

/// Outgoing edges of a question, one per tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Edges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<NextTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<NextTarget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<NextTarget>,
}

impl Edges {
    /// Edges that send every tier to the same target.
    pub fn uniform(target: NextTarget) -> Self {
        Self {
            low: Some(target.clone()),
            medium: Some(target.clone()),
            high: Some(target),
        }
    }

    pub fn get(&self, tier: Tier) -> Option<&NextTarget> {
        match tier {
            Tier::Low => self.low.as_ref(),
            Tier::Medium => self.medium.as_ref(),
            Tier::High => self.high.as_ref(),
        }
    }

    /// `(tier, target)` pairs for every declared edge.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &NextTarget)> {
        Tier::ALL
            .into_iter()
            .filter_map(move |tier| self.get(tier).map(|target| (tier, target)))
    }
}

/// Target of an edge: another question, or the end of the assessment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NextTarget {
    Question(String),
    End,
}

impl NextTarget {
    pub fn question(id: impl Into<String>) -> Self {
        NextTarget::Question(id.into())
    }
}

impl From<String> for NextTarget {
    fn from(s: String) -> Self {
        if s == END_MARKER {
            NextTarget::End
        } else {
            NextTarget::Question(s)
        }
    }
}

impl From<NextTarget> for String {
    fn from(target: NextTarget) -> Self {
        match target {
            NextTarget::Question(id) => id,
            NextTarget::End => END_MARKER.to_string(),
        }
    }
}

/// Severity tier used to pick the outgoing edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Low, Tier::Medium, Tier::High];

    /// Bucket a severity: `<= 1` low, `2` medium, `>= 3` high.
    ///
    /// The thresholds belong to the instrument design and are not configurable.
    pub fn from_severity(severity: i64) -> Self {
        if severity <= 1 {
            Tier::Low
        } else if severity == 2 {
            Tier::Medium
        } else {
            Tier::High
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Low => write!(f, "low"),
            Tier::Medium => write!(f, "medium"),
            Tier::High => write!(f, "high"),
        }
    }
}

/// An immutable, validated question bank for one test type.
///
/// The entry node is the first question in declared order.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    test_type: String,
    title: Option<String>,
    description: Option<String>,
    questions: Vec<Question>,
    index: HashMap<String, usize>,
}

impl QuestionBank {
    /// Build a bank, rejecting nodes the resolver could never navigate.
    pub fn new(test_type: impl Into<String>, questions: Vec<Question>) -> Result<Self, BankError> {
        let test_type = test_type.into();
        let mut index = HashMap::with_capacity(questions.len());

        for (pos, q) in questions.iter().enumerate() {
            if q.id.trim().is_empty() {
                return Err(BankError::malformed(
                    &test_type,
                    format!("question at position {pos} has an empty id"),
                ));
            }
            if q.severity_map.is_empty() {
                return Err(BankError::malformed(
                    &test_type,
                    format!("question {} has an empty severity_map", q.id),
                ));
            }
            if let Some(key) = q
                .payload
                .keys()
                .find(|k| RESERVED_PAYLOAD_KEYS.contains(&k.as_str()))
            {
                return Err(BankError::malformed(
                    &test_type,
                    format!("question {} uses reserved key '{key}'", q.id),
                ));
            }
            if index.insert(q.id.clone(), pos).is_some() {
                return Err(BankError::malformed(
                    &test_type,
                    format!("duplicate question id: {}", q.id),
                ));
            }
        }

        Ok(Self {
            test_type,
            title: None,
            description: None,
            questions,
            index,
        })
    }

    /// Attach display metadata.
    pub fn with_metadata(mut self, title: Option<String>, description: Option<String>) -> Self {
        self.title = title;
        self.description = description;
        self
    }

    pub fn test_type(&self) -> &str {
        &self.test_type
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Display name: the title if present, otherwise the test type.
    pub fn name(&self) -> &str {
        self.title().unwrap_or(&self.test_type)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The entry node.
    pub fn first(&self) -> Option<&Question> {
        self.questions.first()
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.index.get(id).map(|&pos| &self.questions[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }
}

/// Outcome of a successful navigation step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Question(Question),
    End,
}

impl Step {
    pub fn is_end(&self) -> bool {
        matches!(self, Step::End)
    }

    pub fn as_question(&self) -> Option<&Question> {
        match self {
            Step::Question(q) => Some(q),
            Step::End => None,
        }
    }

    pub fn to_public(&self) -> NextStep {
        match self {
            Step::Question(q) => NextStep::Question(q.to_public()),
            Step::End => NextStep::End { end: true },
        }
    }
}

/// Question fields safe to expose to callers. Routing data stays internal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: String,
    pub text: String,
    /// Answer labels the caller may submit, in display order.
    pub options: Vec<String>,
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

/// Public form of a navigation step: a question, or `{"end": true}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NextStep {
    Question(PublicQuestion),
    End { end: bool },
}

impl NextStep {
    pub fn is_end(&self) -> bool {
        matches!(self, NextStep::End { .. })
    }
}

/// Qualitative reading of a normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Interpretation {
    Minimal,
    Mild,
    Moderate,
    Severe,
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interpretation::Minimal => write!(f, "Minimal"),
            Interpretation::Mild => write!(f, "Mild"),
            Interpretation::Moderate => write!(f, "Moderate"),
            Interpretation::Severe => write!(f, "Severe"),
        }
    }
}

impl FromStr for Interpretation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimal" => Ok(Interpretation::Minimal),
            "mild" => Ok(Interpretation::Mild),
            "moderate" => Ok(Interpretation::Moderate),
            "severe" => Ok(Interpretation::Severe),
            other => Err(format!("unknown interpretation: {other}")),
        }
    }
}

/// A submitted assessment. Created once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub id: Uuid,
    pub user_id: String,
    pub test_type: String,
    pub score: i64,
    pub result_text: Interpretation,
    /// Question id to answer label, in the order answered.
    pub answers: IndexMap<String, String>,
    pub created_at: DateTime<Utc>,
}
