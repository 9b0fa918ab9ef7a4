use crate::core::record_store::RecordStore;
use crate::parser::record::LogRecord;
use serde::Serialize;
use std::fmt;

/// Detection categories reported by the built-in rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "sql_injection")]
    SqlInjection,
    #[serde(rename = "path_traversal")]
    PathTraversal,
    #[serde(rename = "excessive_404s")]
    Excessive404,
}

impl Category {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SqlInjection => "sql_injection",
            Self::PathTraversal => "path_traversal",
            Self::Excessive404 => "excessive_404s",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A heuristic detection rule.
///
/// Rules flag *possibly* malicious records as evidence for human review;
/// they never block or mutate anything, and a record may be flagged by
/// several rules at once. This trait is the extension seam for custom
/// detections.
pub trait DetectionRule: Send + Sync {
    fn category(&self) -> Category;

    /// The records this rule flags, in original store order.
    fn flag<'a>(&self, store: &'a RecordStore) -> Vec<&'a LogRecord>;
}
