//! The `mindscreen start` command.

use anyhow::Result;
use serde_json::json;

use mindscreen_core::error::AssessmentError;
use mindscreen_core::traits::BankSource;

use crate::GlobalArgs;

pub fn execute(global: &GlobalArgs, test_type: Option<String>) -> Result<()> {
    let config = super::load_config(global)?;
    let service = super::build_service(&config);

    let question = match service.start(test_type.as_deref()) {
        Ok(q) => q,
        Err(AssessmentError::Bank(e)) if e.is_not_found() => {
            let available = service.resolver().source().test_types();
            anyhow::bail!("{e} (available: {})", available.join(", "));
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", serde_json::to_string_pretty(&json!({ "question": question }))?);
    Ok(())
}
