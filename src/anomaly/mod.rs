pub mod excessive_404;
pub mod path_traversal;
pub mod rule;
pub mod sql_injection;

pub use rule::{Category, DetectionRule};

use crate::core::record_store::RecordStore;
use crate::parser::record::LogRecord;
use excessive_404::Excessive404Rule;
use indexmap::IndexMap;
use path_traversal::PathTraversalRule;
use serde::Serialize;
use sql_injection::SqlInjectionRule;
use tracing::debug;

/// Evidence collected by a detection run: flagged records grouped by
/// category, original store order preserved within each category.
///
/// Categories without hits are absent. The rules are non-exclusive, so one
/// record may appear under several categories.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DetectionReport {
    categories: IndexMap<Category, Vec<LogRecord>>,
}

impl DetectionReport {
    pub fn categories(&self) -> &IndexMap<Category, Vec<LogRecord>> {
        &self.categories
    }

    /// Flagged records for one category; empty when the category has no hits.
    pub fn records(&self, category: Category) -> &[LogRecord] {
        match self.categories.get(&category) {
            Some(records) => records,
            None => &[],
        }
    }

    /// Hit count per category, for summary reporting.
    pub fn counts(&self) -> IndexMap<Category, usize> {
        self.categories
            .iter()
            .map(|(category, records)| (*category, records.len()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// The built-in detection rule set, in reporting order.
pub fn default_rules() -> Vec<Box<dyn DetectionRule>> {
    vec![
        Box::new(SqlInjectionRule::new()),
        Box::new(PathTraversalRule::new()),
        Box::new(Excessive404Rule::new()),
    ]
}

/// Run the built-in rules over a store.
pub fn detect(store: &RecordStore) -> DetectionReport {
    detect_with(store, &default_rules())
}

/// Run an explicit rule set over a store.
///
/// Detection is read-only evidence collection: heuristics flag records for
/// human review, nothing is blocked or mutated.
pub fn detect_with(store: &RecordStore, rules: &[Box<dyn DetectionRule>]) -> DetectionReport {
    let mut categories = IndexMap::new();
    for rule in rules {
        let flagged = rule.flag(store);
        debug!(
            "rule {} flagged {} of {} records",
            rule.category(),
            flagged.len(),
            store.len()
        );
        if !flagged.is_empty() {
            categories.insert(rule.category(), flagged.into_iter().cloned().collect());
        }
    }
    DetectionReport { categories }
}
