//! Assessment service: the start / answer / submit / history contract a
//! routing layer calls.

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AssessmentError;
use crate::interpret::interpret;
use crate::model::{AssessmentResult, Interpretation, NextStep, PublicQuestion};
use crate::resolver::Resolver;
use crate::traits::{BankSource, ResultStore};

/// Test type used when the caller does not name one.
pub const DEFAULT_TEST_TYPE: &str = "stress";

/// What `submit` hands back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub id: Uuid,
    pub result_text: Interpretation,
}

/// Drives assessments for any number of concurrent users.
///
/// Holds no per-user state: the caller resubmits the current question with
/// each answer and keeps its own running score.
pub struct AssessmentService<S, R> {
    resolver: Resolver<S>,
    store: R,
    default_test_type: String,
}

impl<S: BankSource, R: ResultStore> AssessmentService<S, R> {
    pub fn new(resolver: Resolver<S>, store: R) -> Self {
        Self {
            resolver,
            store,
            default_test_type: DEFAULT_TEST_TYPE.to_string(),
        }
    }

    pub fn with_default_test_type(mut self, test_type: impl Into<String>) -> Self {
        self.default_test_type = test_type.into();
        self
    }

    pub fn resolver(&self) -> &Resolver<S> {
        &self.resolver
    }

    pub fn store(&self) -> &R {
        &self.store
    }

    fn test_type<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested {
            Some(t) if !t.is_empty() => t,
            _ => &self.default_test_type,
        }
    }

    /// The entry question of a test, without its routing data.
    pub fn start(&self, test_type: Option<&str>) -> Result<PublicQuestion, AssessmentError> {
        let test_type = self.test_type(test_type);
        let question = self.resolver.first_question(test_type)?;
        tracing::debug!(test_type, question = %question.id, "assessment started");
        Ok(question.to_public())
    }

    /// The question after `current_question_id`, the end marker, or `None`
    /// when the question id or answer is not valid for the bank.
    pub fn answer(
        &self,
        test_type: Option<&str>,
        current_question_id: &str,
        answer: &str,
    ) -> Result<Option<NextStep>, AssessmentError> {
        if current_question_id.is_empty() {
            return Err(AssessmentError::MissingField("current_question_id"));
        }
        if answer.is_empty() {
            return Err(AssessmentError::MissingField("answer"));
        }

        let test_type = self.test_type(test_type);
        let step = self
            .resolver
            .next_question(test_type, current_question_id, answer)?;
        Ok(step.map(|s| s.to_public()))
    }

    /// Interpret and persist a finished assessment.
    ///
    /// The interpretation is normalized over `answers.len()` questions.
    pub fn submit(
        &self,
        user_id: &str,
        test_type: &str,
        score: i64,
        answers: IndexMap<String, String>,
    ) -> Result<SubmitReceipt, AssessmentError> {
        if user_id.is_empty() {
            return Err(AssessmentError::MissingField("user_id"));
        }
        if test_type.is_empty() {
            return Err(AssessmentError::MissingField("test_type"));
        }

        let result_text = interpret(score, answers.len());
        let result = AssessmentResult {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            test_type: test_type.to_string(),
            score,
            result_text,
            answers,
            created_at: Utc::now(),
        };

        self.store.save(&result)?;
        tracing::info!(
            test_type,
            score,
            result = %result_text,
            "assessment {} submitted",
            result.id
        );

        Ok(SubmitReceipt {
            id: result.id,
            result_text,
        })
    }

    /// Past results for a user, newest first.
    pub fn history(&self, user_id: &str) -> Result<Vec<AssessmentResult>, AssessmentError> {
        if user_id.is_empty() {
            return Err(AssessmentError::MissingField("user_id"));
        }
        Ok(self.store.history(user_id)?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::source::StaticBankSource;
    use crate::testing::stress_source;

    #[derive(Default)]
    struct VecStore {
        results: Mutex<Vec<AssessmentResult>>,
    }

    impl ResultStore for VecStore {
        fn save(&self, result: &AssessmentResult) -> anyhow::Result<()> {
            self.results.lock().unwrap().push(result.clone());
            Ok(())
        }

        fn history(&self, user_id: &str) -> anyhow::Result<Vec<AssessmentResult>> {
            let mut found: Vec<_> = self
                .results
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect();
            found.reverse();
            Ok(found)
        }
    }

    struct FailingStore;

    impl ResultStore for FailingStore {
        fn save(&self, _: &AssessmentResult) -> anyhow::Result<()> {
            anyhow::bail!("disk full")
        }

        fn history(&self, _: &str) -> anyhow::Result<Vec<AssessmentResult>> {
            Ok(Vec::new())
        }
    }

    fn service() -> AssessmentService<StaticBankSource, VecStore> {
        AssessmentService::new(Resolver::cached(stress_source()), VecStore::default())
    }

    fn answers(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(q, a)| (q.to_string(), a.to_string()))
            .collect()
    }

    #[test]
    fn start_defaults_to_stress() {
        let svc = service();
        let q = svc.start(None).unwrap();
        assert_eq!(q.id, "Q1");
        assert_eq!(q.options, ["Rarely", "Sometimes", "Often"]);
        assert_eq!(svc.start(Some("")).unwrap().id, "Q1");
    }

    #[test]
    fn start_unknown_test_type() {
        let err = service().start(Some("anxiety")).unwrap_err();
        assert!(matches!(err, AssessmentError::Bank(ref e) if e.is_not_found()));
    }

    #[test]
    fn answer_walks_to_the_end() {
        let svc = service();
        let next = svc.answer(Some("stress"), "Q1", "Often").unwrap().unwrap();
        match next {
            NextStep::Question(q) => assert_eq!(q.id, "Q3"),
            NextStep::End { .. } => panic!("expected Q3"),
        }
        let end = svc.answer(Some("stress"), "Q3", "Rarely").unwrap().unwrap();
        assert!(end.is_end());
    }

    #[test]
    fn answer_invalid_is_none() {
        let svc = service();
        assert!(svc.answer(None, "Q1", "Never").unwrap().is_none());
        assert!(svc.answer(None, "Q42", "Often").unwrap().is_none());
    }

    #[test]
    fn answer_requires_fields() {
        let svc = service();
        assert!(matches!(
            svc.answer(None, "", "Often"),
            Err(AssessmentError::MissingField("current_question_id"))
        ));
        assert!(matches!(
            svc.answer(None, "Q1", ""),
            Err(AssessmentError::MissingField("answer"))
        ));
    }

    #[test]
    fn submit_interprets_and_persists() {
        let svc = service();
        let receipt = svc
            .submit(
                "user-1",
                "stress",
                6,
                answers(&[("Q1", "Often"), ("Q3", "Sometimes")]),
            )
            .unwrap();
        // 6 / 8 = 75%
        assert_eq!(receipt.result_text, Interpretation::Severe);

        let history = svc.history("user-1").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, receipt.id);
        assert_eq!(history[0].score, 6);
        assert_eq!(history[0].answers.len(), 2);
        assert!(svc.history("user-2").unwrap().is_empty());
    }

    #[test]
    fn submit_without_answers_is_minimal() {
        let receipt = service()
            .submit("user-1", "stress", 12, IndexMap::new())
            .unwrap();
        assert_eq!(receipt.result_text, Interpretation::Minimal);
    }

    #[test]
    fn submit_requires_test_type() {
        assert!(matches!(
            service().submit("user-1", "", 3, IndexMap::new()),
            Err(AssessmentError::MissingField("test_type"))
        ));
    }

    #[test]
    fn store_failures_surface() {
        let svc = AssessmentService::new(Resolver::new(stress_source()), FailingStore);
        let err = svc
            .submit("user-1", "stress", 1, answers(&[("Q1", "Rarely")]))
            .unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn custom_default_test_type() {
        let source = stress_source().with_bank(
            "sleep",
            crate::parser::BankFormat::Json,
            r#"{"questions": [{"id": "s1", "text": "Sleeping badly?", "severity_map": {"No": 0}, "next": {"low": "END"}}]}"#,
        );
        let svc = AssessmentService::new(Resolver::new(source), VecStore::default())
            .with_default_test_type("sleep");
        assert_eq!(svc.start(None).unwrap().id, "s1");
    }
}
