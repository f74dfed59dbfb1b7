//! The `mindscreen validate` command.

use std::path::PathBuf;

use anyhow::Result;

use mindscreen_core::parser::{bank_files, parse_bank_file, validate_bank};

use crate::GlobalArgs;

pub fn execute(global: &GlobalArgs, banks: Option<PathBuf>) -> Result<()> {
    let path = match banks {
        Some(p) => p,
        None => super::load_config(global)?.bank_dir,
    };

    let files = if path.is_dir() {
        bank_files(&path)?
    } else {
        vec![path.clone()]
    };
    anyhow::ensure!(!files.is_empty(), "no question banks found in {}", path.display());

    let mut total_warnings = 0;
    let mut failed = 0;

    for file in &files {
        let bank = match parse_bank_file(file) {
            Ok(bank) => bank,
            Err(e) => {
                // a single explicit file propagates its error as-is
                if files.len() == 1 && !path.is_dir() {
                    return Err(e);
                }
                println!("{}: ERROR: {e:#}", file.display());
                failed += 1;
                continue;
            }
        };

        println!("Bank: {} ({} questions)", bank.name(), bank.len());

        let warnings = validate_bank(&bank);
        for w in &warnings {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if failed > 0 {
        anyhow::bail!("{failed} question bank(s) failed to parse");
    }

    if total_warnings == 0 {
        println!("All question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
