//! The `mindscreen history` command.

use anyhow::Result;

use mindscreen_core::model::AssessmentResult;

use crate::GlobalArgs;

pub fn execute(global: &GlobalArgs, user: String, format: String) -> Result<()> {
    let config = super::load_config(global)?;
    let service = super::build_service(&config);

    let results = service.history(&user)?;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&results)?),
        "table" => {
            if results.is_empty() {
                println!("No assessments recorded for {user}.");
            } else {
                print_table(&results);
            }
        }
        other => anyhow::bail!("unknown format: {other} (expected table or json)"),
    }

    Ok(())
}

fn print_table(results: &[AssessmentResult]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Date", "Test", "Score", "Questions", "Result", "Id"]);

    for r in results {
        table.add_row(vec![
            Cell::new(r.created_at.format("%Y-%m-%d %H:%M")),
            Cell::new(&r.test_type),
            Cell::new(r.score),
            Cell::new(r.answers.len()),
            Cell::new(r.result_text),
            Cell::new(r.id),
        ]);
    }

    println!("{table}");
}
