//! The `mindscreen take` command.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use mindscreen_core::model::{Question, Step};
use mindscreen_core::session::AnswerTrace;

use crate::GlobalArgs;

pub fn execute(
    global: &GlobalArgs,
    test_type: Option<String>,
    user: String,
    dry_run: bool,
) -> Result<()> {
    let config = super::load_config(global)?;
    let service = super::build_service(&config);
    let resolver = service.resolver();

    let test_type = test_type
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| config.default_test_type.clone());

    let bank = resolver.load_bank(&test_type)?;
    let mut current = resolver.first_question(&test_type)?;
    let mut trace = AnswerTrace::new(&test_type);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("{}", bank.name());
    if let Some(description) = bank.description() {
        println!("{description}");
    }
    println!("Answer with the option number or its label.\n");

    loop {
        println!("{}", current.text);
        for (i, option) in current.options().enumerate() {
            println!("  {}. {option}", i + 1);
        }

        let answer = loop {
            print!("> ");
            io::stdout().flush()?;
            let line = lines
                .next()
                .context("input ended before the assessment finished")??;
            match pick_option(&current, line.trim()) {
                Some(answer) => break answer,
                None => println!("Please choose one of the listed options."),
            }
        };

        trace.record(&current, &answer)?;

        match resolver.next_question(&test_type, &current.id, &answer)? {
            Some(Step::Question(next)) => {
                println!();
                current = next;
            }
            Some(Step::End) => break,
            None => anyhow::bail!(
                "question bank '{test_type}' cannot continue after question {} (answer '{answer}')",
                current.id
            ),
        }
    }

    println!("\nAnswered {} question(s), score {}.", trace.len(), trace.score);

    if dry_run {
        println!("Result: {}", trace.interpretation());
        return Ok(());
    }

    let receipt = service.submit(&user, &test_type, trace.score, trace.answers())?;
    println!("Result: {}", receipt.result_text);
    println!("Saved as {}", receipt.id);
    Ok(())
}

/// Match input against the options by 1-based number, exact label, or
/// case-insensitive label.
fn pick_option(question: &Question, input: &str) -> Option<String> {
    if input.is_empty() {
        return None;
    }
    if let Ok(n) = input.parse::<usize>() {
        return question
            .options()
            .nth(n.checked_sub(1)?)
            .map(str::to_string);
    }
    question
        .options()
        .find(|o| *o == input)
        .or_else(|| question.options().find(|o| o.eq_ignore_ascii_case(input)))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use mindscreen_core::model::{Edges, NextTarget};

    use super::*;

    fn question() -> Question {
        Question {
            id: "Q1".into(),
            text: "How often?".into(),
            severity_map: IndexMap::from([
                ("Rarely".to_string(), 0),
                ("Sometimes".to_string(), 2),
                ("Often".to_string(), 3),
            ]),
            next: Edges::uniform(NextTarget::End),
            payload: Default::default(),
        }
    }

    #[test]
    fn pick_by_number_and_label() {
        let q = question();
        assert_eq!(pick_option(&q, "1").as_deref(), Some("Rarely"));
        assert_eq!(pick_option(&q, "3").as_deref(), Some("Often"));
        assert_eq!(pick_option(&q, "Sometimes").as_deref(), Some("Sometimes"));
        assert_eq!(pick_option(&q, "often").as_deref(), Some("Often"));
    }

    #[test]
    fn pick_rejects_out_of_range() {
        let q = question();
        assert!(pick_option(&q, "0").is_none());
        assert!(pick_option(&q, "4").is_none());
        assert!(pick_option(&q, "Never").is_none());
        assert!(pick_option(&q, "").is_none());
    }
}
