use crate::anomaly::rule::{Category, DetectionRule};
use crate::core::record_store::RecordStore;
use crate::parser::record::LogRecord;
use indexmap::IndexMap;

/// Flags clients hammering the server with Not Found responses.
///
/// Counts 404 records per client address over the whole store; once an
/// address exceeds the threshold, *all* of its 404 records are reported as
/// evidence, not just the ones past the crossing point.
pub struct Excessive404Rule {
    threshold: usize,
}

impl Excessive404Rule {
    /// A client is suspicious once its 404 count is strictly above this.
    pub const DEFAULT_THRESHOLD: usize = 10;

    pub const fn new() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }

    pub const fn with_threshold(threshold: usize) -> Self {
        Self { threshold }
    }
}

impl Default for Excessive404Rule {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectionRule for Excessive404Rule {
    fn category(&self) -> Category {
        Category::Excessive404
    }

    fn flag<'a>(&self, store: &'a RecordStore) -> Vec<&'a LogRecord> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for record in store {
            if record.status == 404 {
                *counts.entry(record.client_addr.as_str()).or_insert(0) += 1;
            }
        }

        store
            .iter()
            .filter(|record| {
                record.status == 404
                    && counts
                        .get(record.client_addr.as_str())
                        .is_some_and(|&count| count > self.threshold)
            })
            .collect()
    }
}
