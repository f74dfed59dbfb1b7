//! Read-through cache of loaded question banks.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::BankError;
use crate::model::QuestionBank;
use crate::traits::BankSource;

/// Banks keyed by test type, loaded lazily and never mutated once inserted.
///
/// Failed loads are not cached. Two threads missing at the same time may both
/// load; the first insert wins and both get that bank.
#[derive(Debug, Default)]
pub struct BankCache {
    banks: RwLock<HashMap<String, Arc<QuestionBank>>>,
}

impl BankCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached bank, loading it from `source` on a miss.
    pub fn get_or_load<S: BankSource + ?Sized>(
        &self,
        source: &S,
        test_type: &str,
    ) -> Result<Arc<QuestionBank>, BankError> {
        if let Some(bank) = self.get(test_type) {
            tracing::trace!("bank cache hit: {}", test_type);
            return Ok(bank);
        }

        let loaded = Arc::new(source.load(test_type)?);
        let mut banks = self
            .banks
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let bank = banks
            .entry(test_type.to_string())
            .or_insert(loaded)
            .clone();
        Ok(bank)
    }

    pub fn get(&self, test_type: &str) -> Option<Arc<QuestionBank>> {
        self.banks
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(test_type)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.banks
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached bank so the next access reloads from the source.
    pub fn clear(&self) {
        self.banks
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}
