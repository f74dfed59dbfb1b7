//! The `mindscreen answer` command.

use anyhow::Result;
use serde_json::json;

use crate::GlobalArgs;

pub fn execute(
    global: &GlobalArgs,
    test_type: Option<String>,
    question: String,
    answer: String,
) -> Result<()> {
    let config = super::load_config(global)?;
    let service = super::build_service(&config);

    match service.answer(test_type.as_deref(), &question, &answer)? {
        Some(next) => {
            println!("{}", serde_json::to_string_pretty(&json!({ "next": next }))?);
            Ok(())
        }
        None => anyhow::bail!(
            "no next question: '{answer}' is not a valid answer to question '{question}', \
             or the bank has no such question"
        ),
    }
}
