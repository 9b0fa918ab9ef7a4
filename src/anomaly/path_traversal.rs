use crate::anomaly::rule::{Category, DetectionRule};
use crate::core::record_store::RecordStore;
use crate::parser::record::LogRecord;
use fancy_regex::Regex;
use std::sync::LazyLock;

// Parent-directory tokens in either separator style.
static TRAVERSAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\.\./|\.\.\\)").expect("path traversal pattern"));

/// Flags request paths containing parent-directory traversal tokens.
pub struct PathTraversalRule;

impl PathTraversalRule {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for PathTraversalRule {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectionRule for PathTraversalRule {
    fn category(&self) -> Category {
        Category::PathTraversal
    }

    fn flag<'a>(&self, store: &'a RecordStore) -> Vec<&'a LogRecord> {
        store
            .iter()
            .filter(|record| TRAVERSAL_PATTERN.is_match(&record.path).unwrap_or(false))
            .collect()
    }
}
