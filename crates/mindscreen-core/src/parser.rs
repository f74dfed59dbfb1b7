//! Question bank parser and validator.
//!
//! Banks are JSON or TOML documents with a top-level `questions` list. Parsing
//! rejects anything the resolver could not navigate; `validate_bank` reports
//! the softer integrity problems (dangling edges, unreachable nodes).

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::BankError;
use crate::interpret::MAX_SEVERITY;
use crate::model::{NextTarget, Question, QuestionBank, Tier};

/// On-disk document layout.
#[derive(Debug, Deserialize)]
struct BankFile {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    questions: Vec<Question>,
}

/// Serialization format of a bank document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankFormat {
    Json,
    Toml,
}

impl BankFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(BankFormat::Json),
            "toml" => Some(BankFormat::Toml),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            BankFormat::Json => "json",
            BankFormat::Toml => "toml",
        }
    }
}

/// Parse a bank document held in memory.
pub fn parse_bank_str(
    content: &str,
    format: BankFormat,
    test_type: &str,
) -> Result<QuestionBank, BankError> {
    let parsed: BankFile = match format {
        BankFormat::Json => {
            serde_json::from_str(content).map_err(|e| BankError::malformed(test_type, e.to_string()))?
        }
        BankFormat::Toml => {
            toml::from_str(content).map_err(|e| BankError::malformed(test_type, e.to_string()))?
        }
    };

    Ok(QuestionBank::new(test_type, parsed.questions)?
        .with_metadata(parsed.title, parsed.description))
}

/// Parse a bank file. The test type is the file stem.
pub fn parse_bank_file(path: &Path) -> Result<QuestionBank> {
    let format = BankFormat::from_path(path)
        .with_context(|| format!("unsupported bank file extension: {}", path.display()))?;
    let test_type = path
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("invalid bank file name: {}", path.display()))?;

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, format, test_type)
        .with_context(|| format!("failed to parse question bank: {}", path.display()))
}

/// Every bank file directly under `dir`, sorted by path.
pub fn bank_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && BankFormat::from_path(&path).is_some() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load every parseable bank in a directory, skipping broken files.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();
    for path in bank_files(dir)? {
        match parse_bank_file(&path) {
            Ok(bank) => banks.push(bank),
            Err(e) => {
                tracing::warn!("skipping {}: {:#}", path.display(), e);
            }
        }
    }
    Ok(banks)
}

/// A non-fatal problem found in a bank.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question the warning is about (if applicable).
    pub question_id: Option<String>,
    pub message: String,
}

impl ValidationWarning {
    fn question(id: &str, message: String) -> Self {
        Self {
            question_id: Some(id.to_string()),
            message,
        }
    }
}

/// Check a bank for integrity problems that do not prevent loading.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "bank has no questions".into(),
        });
        return warnings;
    }

    for q in bank.questions() {
        if q.text.trim().is_empty() {
            warnings.push(ValidationWarning::question(&q.id, "prompt text is empty".into()));
        }

        for (answer, &severity) in &q.severity_map {
            if !(0..=MAX_SEVERITY).contains(&severity) {
                warnings.push(ValidationWarning::question(
                    &q.id,
                    format!("answer '{answer}' has severity {severity} outside 0..={MAX_SEVERITY}"),
                ));
            }
        }

        // Only tiers some answer can actually produce need an edge.
        let reachable_tiers: HashSet<Tier> = q
            .severity_map
            .values()
            .map(|&s| Tier::from_severity(s))
            .collect();
        for tier in Tier::ALL {
            if reachable_tiers.contains(&tier) && q.next.get(tier).is_none() {
                warnings.push(ValidationWarning::question(
                    &q.id,
                    format!("no '{tier}' edge but an answer maps to that tier"),
                ));
            }
        }

        for (tier, target) in q.next.iter() {
            if let NextTarget::Question(target) = target {
                if !bank.contains(target) {
                    warnings.push(ValidationWarning::question(
                        &q.id,
                        format!("'{tier}' edge points at missing question {target}"),
                    ));
                }
            }
        }
    }

    let (reachable, reaches_end) = walk_from_entry(bank);
    for q in bank.questions() {
        if !reachable.contains(q.id.as_str()) {
            warnings.push(ValidationWarning::question(
                &q.id,
                "unreachable from the entry question".into(),
            ));
        }
    }
    if !reaches_end {
        warnings.push(ValidationWarning {
            question_id: None,
            message: format!("no path from the entry question reaches {}", crate::model::END_MARKER),
        });
    }

    warnings
}

/// Breadth-first walk over declared edges from the entry node.
fn walk_from_entry(bank: &QuestionBank) -> (HashSet<&str>, bool) {
    let mut seen = HashSet::new();
    let mut reaches_end = false;
    let mut queue = VecDeque::new();

    if let Some(entry) = bank.first() {
        seen.insert(entry.id.as_str());
        queue.push_back(entry);
    }

    while let Some(q) = queue.pop_front() {
        for (_, target) in q.next.iter() {
            match target {
                NextTarget::End => reaches_end = true,
                NextTarget::Question(id) => {
                    if let Some(next) = bank.get(id) {
                        if seen.insert(next.id.as_str()) {
                            queue.push_back(next);
                        }
                    }
                }
            }
        }
    }

    (seen, reaches_end)
}
