//! mindscreen-core — adaptive screening questionnaires.
//!
//! Question banks are directed graphs of questions. The resolver walks them
//! one answer at a time, choosing the next question by the severity of the
//! answer; the interpreter turns the accumulated score into a qualitative
//! label.

pub mod cache;
pub mod config;
pub mod error;
pub mod interpret;
pub mod model;
pub mod parser;
pub mod resolver;
pub mod service;
pub mod session;
pub mod source;
pub mod traits;

#[cfg(test)]
mod testing;

pub use error::{AssessmentError, BankError, NavigationError, ResolveError};
pub use interpret::{interpret, normalized_score, MAX_SEVERITY};
pub use model::{Interpretation, NextStep, PublicQuestion, Question, QuestionBank, Step, Tier};
pub use resolver::Resolver;
pub use service::AssessmentService;
