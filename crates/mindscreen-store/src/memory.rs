//! In-process result store.

use std::sync::Mutex;

use anyhow::Result;

use mindscreen_core::model::AssessmentResult;
use mindscreen_core::traits::ResultStore;

/// Keeps results for the life of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    results: Mutex<Vec<AssessmentResult>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.results
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultStore for MemoryStore {
    fn save(&self, result: &AssessmentResult) -> Result<()> {
        let mut results = self
            .results
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        anyhow::ensure!(
            !results.iter().any(|r| r.id == result.id),
            "result {} already stored",
            result.id
        );
        results.push(result.clone());
        Ok(())
    }

    fn history(&self, user_id: &str) -> Result<Vec<AssessmentResult>> {
        let results = self
            .results
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(crate::user_history(results.iter(), user_id))
    }
}
