//! The `mindscreen submit` command.

use anyhow::Result;
use indexmap::IndexMap;
use serde_json::json;

use crate::GlobalArgs;

pub fn execute(
    global: &GlobalArgs,
    test_type: String,
    score: i64,
    answers: String,
    user: String,
) -> Result<()> {
    let answers = parse_answers(&answers)?;

    let config = super::load_config(global)?;
    let service = super::build_service(&config);

    let receipt = service.submit(&user, &test_type, score, answers)?;
    let output = json!({
        "message": "Assessment submitted successfully",
        "id": receipt.id,
        "result_text": receipt.result_text,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Parse `Q1=Often,Q2=Sometimes` into an ordered map.
fn parse_answers(s: &str) -> Result<IndexMap<String, String>> {
    s.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| -> Result<(String, String)> {
            let (question, answer) = pair
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("invalid answer '{pair}', expected question=answer"))?;
            let (question, answer) = (question.trim(), answer.trim());
            anyhow::ensure!(
                !question.is_empty() && !answer.is_empty(),
                "invalid answer '{pair}', expected question=answer"
            );
            Ok((question.to_string(), answer.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_answer_pairs() {
        let answers = parse_answers("Q1=Often, Q3 = Sometimes").unwrap();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers["Q1"], "Often");
        assert_eq!(answers["Q3"], "Sometimes");
        assert_eq!(answers.keys().collect::<Vec<_>>(), ["Q1", "Q3"]);
    }

    #[test]
    fn parse_empty_answers() {
        assert!(parse_answers("").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_malformed_pairs() {
        assert!(parse_answers("Q1").is_err());
        assert!(parse_answers("=Often").is_err());
    }
}
