//! The `mindscreen interpret` command.

use anyhow::Result;

use mindscreen_core::interpret::{interpret, normalized_score};

pub fn execute(score: i64, questions: usize) -> Result<()> {
    let label = interpret(score, questions);
    println!("Interpretation: {label}");
    match normalized_score(score, questions) {
        Some(normalized) => println!("Normalized score: {normalized:.1}%"),
        None => println!("Normalized score: n/a (no questions answered)"),
    }
    Ok(())
}
