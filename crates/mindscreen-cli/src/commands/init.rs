//! The `mindscreen init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create mindscreen.toml
    if Path::new("mindscreen.toml").exists() {
        println!("mindscreen.toml already exists, skipping.");
    } else {
        std::fs::write("mindscreen.toml", SAMPLE_CONFIG)?;
        println!("Created mindscreen.toml");
    }

    // Create example question bank
    std::fs::create_dir_all("question-banks")?;
    let bank_path = Path::new("question-banks/stress.json");
    if bank_path.exists() {
        println!("question-banks/stress.json already exists, skipping.");
    } else {
        std::fs::write(bank_path, EXAMPLE_BANK)?;
        println!("Created question-banks/stress.json");
    }

    println!("\nNext steps:");
    println!("  1. Run: mindscreen validate");
    println!("  2. Run: mindscreen take --test-type stress --user me");
    println!("  3. Run: mindscreen history --user me");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mindscreen configuration

bank_dir = "./question-banks"
results_path = "./mindscreen-results/results.json"
cache_banks = true
default_test_type = "stress"
"#;

const EXAMPLE_BANK: &str = include_str!("../../../../question-banks/stress.json");
