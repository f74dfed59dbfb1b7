//! mindscreen configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level mindscreen configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindscreenConfig {
    /// Directory holding `<test_type>.json` / `<test_type>.toml` banks.
    #[serde(default = "default_bank_dir")]
    pub bank_dir: PathBuf,
    /// JSON file submitted results are appended to.
    #[serde(default = "default_results_path")]
    pub results_path: PathBuf,
    /// Keep parsed banks for the life of the process.
    #[serde(default = "default_true")]
    pub cache_banks: bool,
    /// Test type used when a request does not name one.
    #[serde(default = "default_test_type")]
    pub default_test_type: String,
}

fn default_bank_dir() -> PathBuf {
    PathBuf::from("./question-banks")
}
fn default_results_path() -> PathBuf {
    PathBuf::from("./mindscreen-results/results.json")
}
fn default_true() -> bool {
    true
}
fn default_test_type() -> String {
    "stress".to_string()
}

impl Default for MindscreenConfig {
    fn default() -> Self {
        Self {
            bank_dir: default_bank_dir(),
            results_path: default_results_path(),
            cache_banks: true,
            default_test_type: default_test_type(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        // substituted values are not expanded again
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `mindscreen.toml` in the current directory
/// 2. `~/.config/mindscreen/config.toml`
///
/// Environment variable overrides: `MINDSCREEN_BANK_DIR`, `MINDSCREEN_RESULTS_PATH`.
pub fn load_config() -> Result<MindscreenConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<MindscreenConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mindscreen.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<MindscreenConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => MindscreenConfig::default(),
    };

    if let Ok(dir) = std::env::var("MINDSCREEN_BANK_DIR") {
        config.bank_dir = PathBuf::from(dir);
    }
    if let Ok(path) = std::env::var("MINDSCREEN_RESULTS_PATH") {
        config.results_path = PathBuf::from(path);
    }

    config.bank_dir = resolve_path(&config.bank_dir);
    config.results_path = resolve_path(&config.results_path);

    anyhow::ensure!(
        crate::traits::is_valid_test_type(&config.default_test_type),
        "default_test_type must be a plain identifier, got '{}'",
        config.default_test_type
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mindscreen"))
}
