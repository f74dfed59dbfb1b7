//! Result store backed by a single JSON file.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};

use mindscreen_core::model::AssessmentResult;
use mindscreen_core::traits::ResultStore;

/// Stores every result as one pretty-printed JSON array.
///
/// Writes go through a temporary sibling file and a rename, so a crash leaves
/// either the old or the new array on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored result in submission order. A missing file is empty.
    pub fn load_all(&self) -> Result<Vec<AssessmentResult>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read results from {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse results in {}", self.path.display()))
    }

    fn write_all(&self, results: &[AssessmentResult]) -> Result<()> {
        let json = serde_json::to_string_pretty(results).context("failed to serialize results")?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .with_context(|| format!("failed to write results to {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

impl ResultStore for JsonFileStore {
    fn save(&self, result: &AssessmentResult) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut results = self.load_all()?;
        anyhow::ensure!(
            !results.iter().any(|r| r.id == result.id),
            "result {} already stored",
            result.id
        );
        results.push(result.clone());
        self.write_all(&results)?;

        tracing::debug!("saved result {} to {}", result.id, self.path.display());
        Ok(())
    }

    fn history(&self, user_id: &str) -> Result<Vec<AssessmentResult>> {
        let results = self.load_all()?;
        Ok(crate::user_history(&results, user_id))
    }
}
