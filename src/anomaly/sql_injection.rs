use crate::anomaly::rule::{Category, DetectionRule};
use crate::core::record_store::RecordStore;
use crate::parser::record::LogRecord;
use fancy_regex::Regex;
use std::sync::LazyLock;

// Quote characters, whole-word boolean operators, UNION/SELECT/DROP and the
// SQL comment marker, anywhere in the request path (query string included).
static SQL_INJECTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)('|"|\s+or\s+|\s+and\s+|\s+union\s+|select\s+|drop\s+|--)"#)
        .expect("sql injection pattern")
});

/// Flags request paths that look like SQL injection probes.
pub struct SqlInjectionRule;

impl SqlInjectionRule {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for SqlInjectionRule {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectionRule for SqlInjectionRule {
    fn category(&self) -> Category {
        Category::SqlInjection
    }

    fn flag<'a>(&self, store: &'a RecordStore) -> Vec<&'a LogRecord> {
        store
            .iter()
            .filter(|record| {
                SQL_INJECTION_PATTERN
                    .is_match(&record.path)
                    .unwrap_or(false)
            })
            .collect()
    }
}
