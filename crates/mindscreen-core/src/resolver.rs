//! Question graph resolver.
//!
//! Navigation is stateless: every call names the test type, the current
//! question, and the answer given, and the resolver follows one edge.

use std::sync::Arc;

use crate::cache::BankCache;
use crate::error::{BankError, NavigationError, ResolveError};
use crate::model::{NextTarget, Question, QuestionBank, Step, Tier};
use crate::traits::BankSource;

/// Follow one edge of `bank` from `current_id` given `answer`.
pub fn navigate(bank: &QuestionBank, current_id: &str, answer: &str) -> Result<Step, NavigationError> {
    let current = bank
        .get(current_id)
        .ok_or_else(|| NavigationError::UnknownQuestion {
            question_id: current_id.to_string(),
        })?;

    let severity = current
        .severity(answer)
        .ok_or_else(|| NavigationError::InvalidAnswer {
            question_id: current_id.to_string(),
            answer: answer.to_string(),
        })?;

    let tier = Tier::from_severity(severity);
    match current.next.get(tier) {
        None => Err(NavigationError::MissingEdge {
            question_id: current_id.to_string(),
            tier,
        }),
        Some(NextTarget::End) => Ok(Step::End),
        Some(NextTarget::Question(next_id)) => bank
            .get(next_id)
            .map(|q| Step::Question(q.clone()))
            .ok_or_else(|| NavigationError::DanglingEdge {
                question_id: current_id.to_string(),
                tier,
                target: next_id.clone(),
            }),
    }
}

/// Resolves entry and next questions for banks served by `S`.
#[derive(Debug)]
pub struct Resolver<S> {
    source: S,
    cache: Option<BankCache>,
}

impl<S: BankSource> Resolver<S> {
    /// A resolver that reads the bank from its source on every call.
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: None,
        }
    }

    /// A resolver that keeps each bank after its first successful load.
    pub fn cached(source: S) -> Self {
        Self::with_cache(source, BankCache::new())
    }

    pub fn with_cache(source: S, cache: BankCache) -> Self {
        Self {
            source,
            cache: Some(cache),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> Option<&BankCache> {
        self.cache.as_ref()
    }

    /// Load (or fetch from cache) the bank for `test_type`.
    pub fn load_bank(&self, test_type: &str) -> Result<Arc<QuestionBank>, BankError> {
        match &self.cache {
            Some(cache) => cache.get_or_load(&self.source, test_type),
            None => self.source.load(test_type).map(Arc::new),
        }
    }

    /// The entry question: the first node in the bank's declared order.
    pub fn first_question(&self, test_type: &str) -> Result<Question, BankError> {
        let bank = self.load_bank(test_type)?;
        bank.first().cloned().ok_or_else(|| BankError::EmptyBank {
            test_type: test_type.to_string(),
        })
    }

    /// Follow one edge, reporting exactly why navigation failed.
    pub fn resolve_next(
        &self,
        test_type: &str,
        current_id: &str,
        answer: &str,
    ) -> Result<Step, ResolveError> {
        let bank = self.load_bank(test_type)?;
        Ok(navigate(&bank, current_id, answer)?)
    }

    /// Follow one edge; every navigation failure collapses to `None`.
    ///
    /// `None` is not the end of the assessment (that is `Step::End`); callers
    /// must stop the traversal and report an error.
    pub fn next_question(
        &self,
        test_type: &str,
        current_id: &str,
        answer: &str,
    ) -> Result<Option<Step>, BankError> {
        match self.resolve_next(test_type, current_id, answer) {
            Ok(step) => Ok(Some(step)),
            Err(ResolveError::Bank(e)) => Err(e),
            Err(ResolveError::Navigation(e)) => {
                tracing::debug!(test_type, "navigation failed: {}", e);
                Ok(None)
            }
        }
    }

    /// Severity the answer carries, for the caller's running score.
    pub fn severity_of(
        &self,
        test_type: &str,
        question_id: &str,
        answer: &str,
    ) -> Result<i64, ResolveError> {
        let bank = self.load_bank(test_type)?;
        let question = bank
            .get(question_id)
            .ok_or_else(|| NavigationError::UnknownQuestion {
                question_id: question_id.to_string(),
            })?;
        let severity = question
            .severity(answer)
            .ok_or_else(|| NavigationError::InvalidAnswer {
                question_id: question_id.to_string(),
                answer: answer.to_string(),
            })?;
        Ok(severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::BankFormat;
    use crate::source::StaticBankSource;
    use crate::testing::{stress_bank, stress_source};

    fn resolver() -> Resolver<StaticBankSource> {
        Resolver::new(stress_source())
    }

    fn next_id(step: Option<Step>) -> Option<String> {
        step.and_then(|s| s.as_question().map(|q| q.id.clone()))
    }

    #[test]
    fn first_question_is_positional() {
        let r = resolver();
        assert_eq!(r.first_question("stress").unwrap().id, "Q1");
        assert_eq!(r.first_question("stress").unwrap().id, "Q1");
    }

    #[test]
    fn first_question_unknown_bank() {
        assert!(resolver().first_question("anxiety").unwrap_err().is_not_found());
    }

    #[test]
    fn first_question_empty_bank() {
        let source = StaticBankSource::new().with_bank("empty", BankFormat::Json, r#"{"questions": []}"#);
        let err = Resolver::new(source).first_question("empty").unwrap_err();
        assert!(matches!(err, BankError::EmptyBank { .. }));
        assert!(err.is_not_found());
    }

    #[test]
    fn high_severity_follows_high_edge() {
        let step = resolver().next_question("stress", "Q1", "Often").unwrap();
        assert_eq!(next_id(step).as_deref(), Some("Q3"));
    }

    #[test]
    fn low_and_medium_edges() {
        let r = resolver();
        assert_eq!(
            next_id(r.next_question("stress", "Q1", "Rarely").unwrap()).as_deref(),
            Some("Q2")
        );
        assert_eq!(
            next_id(r.next_question("stress", "Q1", "Sometimes").unwrap()).as_deref(),
            Some("Q2")
        );
        assert_eq!(
            next_id(r.next_question("stress", "Q2", "Sometimes").unwrap()).as_deref(),
            Some("Q3")
        );
    }

    #[test]
    fn terminal_edges_end_the_assessment() {
        let r = resolver();
        for answer in ["Rarely", "Sometimes", "Often"] {
            let step = r.next_question("stress", "Q3", answer).unwrap().unwrap();
            assert!(step.is_end(), "answer {answer} should end the assessment");
        }
        assert!(r.next_question("stress", "Q2", "Rarely").unwrap().unwrap().is_end());
    }

    #[test]
    fn invalid_answer_is_absent() {
        let r = resolver();
        assert!(r.next_question("stress", "Q1", "Never").unwrap().is_none());
        // labels are matched exactly
        assert!(r.next_question("stress", "Q1", "often").unwrap().is_none());
    }

    #[test]
    fn unknown_question_is_absent() {
        assert!(resolver().next_question("stress", "Q9", "Often").unwrap().is_none());
    }

    #[test]
    fn unknown_bank_is_an_error_not_absent() {
        assert!(resolver().next_question("anxiety", "Q1", "Often").is_err());
    }

    #[test]
    fn resolve_next_distinguishes_causes() {
        let json = r#"{"questions": [
            {"id": "q1", "text": "a", "severity_map": {"No": 0, "Some": 2, "Yes": 4}, "next": {"low": "END", "high": "q7"}}
        ]}"#;
        let r = Resolver::new(StaticBankSource::new().with_bank("odd", BankFormat::Json, json));

        let err = r.resolve_next("odd", "q2", "No").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Navigation(NavigationError::UnknownQuestion { .. })
        ));

        let err = r.resolve_next("odd", "q1", "Maybe").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Navigation(NavigationError::InvalidAnswer { .. })
        ));

        let err = r.resolve_next("odd", "q1", "Some").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Navigation(NavigationError::MissingEdge {
                tier: Tier::Medium,
                ..
            })
        ));

        let err = r.resolve_next("odd", "q1", "Yes").unwrap_err();
        match err {
            ResolveError::Navigation(NavigationError::DanglingEdge { target, tier, .. }) => {
                assert_eq!(target, "q7");
                assert_eq!(tier, Tier::High);
            }
            other => panic!("expected dangling edge, got {other:?}"),
        }

        // collapsed boundary hides all four
        assert!(r.next_question("odd", "q1", "Yes").unwrap().is_none());
        assert!(r.next_question("odd", "q1", "Some").unwrap().is_none());
    }

    #[test]
    fn next_question_is_idempotent() {
        let r = resolver();
        let a = r.next_question("stress", "Q1", "Sometimes").unwrap();
        let b = r.next_question("stress", "Q1", "Sometimes").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn cached_resolver_behaves_the_same() {
        let r = Resolver::cached(stress_source());
        assert_eq!(r.first_question("stress").unwrap().id, "Q1");
        assert_eq!(
            next_id(r.next_question("stress", "Q1", "Often").unwrap()).as_deref(),
            Some("Q3")
        );
        assert_eq!(r.cache().unwrap().len(), 1);
    }

    #[test]
    fn severity_lookup() {
        let r = resolver();
        assert_eq!(r.severity_of("stress", "Q3", "Often").unwrap(), 4);
        assert!(r.severity_of("stress", "Q3", "Never").is_err());
    }

    #[test]
    fn navigate_on_bank_directly() {
        let bank = stress_bank();
        let step = navigate(&bank, "Q1", "Often").unwrap();
        assert_eq!(step.as_question().unwrap().id, "Q3");
    }
}
