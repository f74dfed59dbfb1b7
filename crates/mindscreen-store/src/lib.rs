//! mindscreen-store — persistence for submitted assessments.
//!
//! Implements the `ResultStore` trait from `mindscreen-core` in memory and
//! as a JSON file.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use mindscreen_core::model::AssessmentResult;

/// Results for `user_id`, newest first.
pub(crate) fn user_history<'a>(
    results: impl IntoIterator<Item = &'a AssessmentResult>,
    user_id: &str,
) -> Vec<AssessmentResult> {
    let mut found: Vec<AssessmentResult> = results
        .into_iter()
        .filter(|r| r.user_id == user_id)
        .cloned()
        .collect();
    // equal timestamps: later submissions first
    found.sort_by_key(|r| r.created_at);
    found.reverse();
    found
}
