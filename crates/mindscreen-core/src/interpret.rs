//! Score normalization and interpretation.
//!
//! Raw scores are rescaled to a 0-100 range against the maximum severity a
//! single answer can carry, so tests that skip questions through branching
//! are still comparable.

use crate::model::Interpretation;

/// Highest severity any single answer carries on this instrument's scale.
pub const MAX_SEVERITY: i64 = 4;

/// Normalized score as a percentage of the maximum possible for
/// `num_questions` answers, or `None` when nothing was answered.
///
/// Values are not clamped: over-max scores exceed 100, negative scores go
/// below 0.
pub fn normalized_score(score: i64, num_questions: usize) -> Option<f64> {
    if num_questions == 0 {
        return None;
    }
    let max_possible = num_questions as f64 * MAX_SEVERITY as f64;
    Some(score as f64 / max_possible * 100.0)
}

/// Classify a raw score into one of four ordinal labels.
///
/// Buckets are half-open: `< 25` Minimal, `< 50` Mild, `< 75` Moderate,
/// everything else Severe. Zero answered questions is `Minimal`.
pub fn interpret(score: i64, num_questions: usize) -> Interpretation {
    match normalized_score(score, num_questions) {
        None => Interpretation::Minimal,
        Some(normalized) => interpret_normalized(normalized),
    }
}

/// Classify an already-normalized percentage.
pub fn interpret_normalized(normalized: f64) -> Interpretation {
    if normalized < 25.0 {
        Interpretation::Minimal
    } else if normalized < 50.0 {
        Interpretation::Mild
    } else if normalized < 75.0 {
        Interpretation::Moderate
    } else {
        Interpretation::Severe
    }
}
