//! Shared fixtures for unit tests.

use crate::model::QuestionBank;
use crate::parser::{parse_bank_str, BankFormat};
use crate::source::StaticBankSource;

pub(crate) const STRESS_JSON: &str = r#"{
  "title": "Stress Check",
  "questions": [
    {
      "id": "Q1",
      "text": "How often have you felt unable to control important things?",
      "severity_map": {"Rarely": 0, "Sometimes": 2, "Often": 3},
      "next": {"low": "Q2", "medium": "Q2", "high": "Q3"}
    },
    {
      "id": "Q2",
      "text": "How often have you felt nervous or stressed?",
      "severity_map": {"Rarely": 0, "Sometimes": 2, "Often": 3},
      "next": {"low": "END", "medium": "Q3", "high": "Q3"}
    },
    {
      "id": "Q3",
      "text": "How often have you found that you could not cope?",
      "severity_map": {"Rarely": 1, "Sometimes": 2, "Often": 4},
      "next": {"low": "END", "medium": "END", "high": "END"}
    }
  ]
}"#;

pub(crate) fn stress_bank() -> QuestionBank {
    parse_bank_str(STRESS_JSON, BankFormat::Json, "stress").unwrap()
}

pub(crate) fn stress_source() -> StaticBankSource {
    StaticBankSource::new().with_bank("stress", BankFormat::Json, STRESS_JSON)
}
