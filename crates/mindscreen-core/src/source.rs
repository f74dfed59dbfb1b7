//! Question bank sources: a directory of bank files, or documents held in
//! memory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::BankError;
use crate::model::QuestionBank;
use crate::parser::{bank_files, parse_bank_str, BankFormat};
use crate::traits::{is_valid_test_type, BankSource};

/// Reads `<root>/<test_type>.json`, falling back to `<root>/<test_type>.toml`.
#[derive(Debug, Clone)]
pub struct DirectoryBankSource {
    root: PathBuf,
}

impl DirectoryBankSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn locate(&self, test_type: &str) -> Option<(PathBuf, BankFormat)> {
        [BankFormat::Json, BankFormat::Toml]
            .into_iter()
            .map(|format| {
                let path = self
                    .root
                    .join(format!("{test_type}.{}", format.extension()));
                (path, format)
            })
            .find(|(path, _)| path.is_file())
    }
}

impl BankSource for DirectoryBankSource {
    fn load(&self, test_type: &str) -> Result<QuestionBank, BankError> {
        if !is_valid_test_type(test_type) {
            return Err(BankError::not_found(test_type));
        }

        let (path, format) = self
            .locate(test_type)
            .ok_or_else(|| BankError::not_found(test_type))?;

        let content = std::fs::read_to_string(&path).map_err(|e| {
            tracing::debug!("failed to read {}: {}", path.display(), e);
            BankError::not_found(test_type)
        })?;

        tracing::debug!("loaded question bank {} from {}", test_type, path.display());
        parse_bank_str(&content, format, test_type)
    }

    fn test_types(&self) -> Vec<String> {
        let mut types: Vec<String> = bank_files(&self.root)
            .unwrap_or_default()
            .iter()
            .filter_map(|p| p.file_stem()?.to_str().map(str::to_string))
            .filter(|t| is_valid_test_type(t))
            .collect();
        // a .json and a .toml bank may share a stem
        types.sort();
        types.dedup();
        types
    }
}

/// Bank documents registered in memory, parsed on every load.
#[derive(Debug, Clone, Default)]
pub struct StaticBankSource {
    documents: HashMap<String, (BankFormat, String)>,
}

impl StaticBankSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the document for `test_type`.
    pub fn with_bank(
        mut self,
        test_type: impl Into<String>,
        format: BankFormat,
        content: impl Into<String>,
    ) -> Self {
        self.documents
            .insert(test_type.into(), (format, content.into()));
        self
    }
}

impl BankSource for StaticBankSource {
    fn load(&self, test_type: &str) -> Result<QuestionBank, BankError> {
        let (format, content) = self
            .documents
            .get(test_type)
            .ok_or_else(|| BankError::not_found(test_type))?;
        parse_bank_str(content, *format, test_type)
    }

    fn test_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.documents.keys().cloned().collect();
        types.sort();
        types
    }
}
