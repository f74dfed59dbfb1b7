//! Subcommand implementations.

pub mod answer;
pub mod history;
pub mod init;
pub mod interpret;
pub mod start;
pub mod submit;
pub mod take;
pub mod validate;

use anyhow::Result;

use mindscreen_core::config::{load_config_from, MindscreenConfig};
use mindscreen_core::resolver::Resolver;
use mindscreen_core::service::AssessmentService;
use mindscreen_core::source::DirectoryBankSource;
use mindscreen_store::JsonFileStore;

use crate::GlobalArgs;

pub type Service = AssessmentService<DirectoryBankSource, JsonFileStore>;

/// Load config and apply command-line overrides.
pub fn load_config(global: &GlobalArgs) -> Result<MindscreenConfig> {
    let mut config = load_config_from(global.config.as_deref())?;
    if let Some(dir) = &global.bank_dir {
        config.bank_dir = dir.clone();
    }
    if let Some(path) = &global.results {
        config.results_path = path.clone();
    }
    Ok(config)
}

/// Build the assessment service described by the config.
pub fn build_service(config: &MindscreenConfig) -> Service {
    let source = DirectoryBankSource::new(&config.bank_dir);
    let resolver = if config.cache_banks {
        Resolver::cached(source)
    } else {
        Resolver::new(source)
    };
    AssessmentService::new(resolver, JsonFileStore::new(&config.results_path))
        .with_default_test_type(config.default_test_type.clone())
}
