// AccessCrab - GPL-3.0-or-later
// This file is part of AccessCrab.
//
// Copyright (C) 2026 Daniel Freiermuth
//
// AccessCrab is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// AccessCrab is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with AccessCrab.  If not, see <https://www.gnu.org/licenses/>.

use crate::analysis::aggregate;
use crate::anomaly;
use crate::anomaly::Category;
use crate::core::record_store::RecordStore;
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::Serialize;

/// Composite analysis result over one record store.
///
/// A derived value object: recomputed on demand, never stored alongside the
/// records. Directly serializable, so reporting collaborators can JSON-export
/// it without further mapping.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_records: usize,
    /// Earliest record timestamp, the start of the analyzed span.
    pub first_timestamp: NaiveDateTime,
    /// Latest record timestamp, the end of the analyzed span.
    pub last_timestamp: NaiveDateTime,
    /// Span length in fractional days.
    pub span_days: f64,
    pub top_client_addrs: Vec<(String, usize)>,
    pub top_paths: Vec<(String, usize)>,
    pub status_codes: IndexMap<u16, usize>,
    pub methods: IndexMap<String, usize>,
    pub total_bandwidth: u64,
    pub average_response_size: f64,
    /// Hit count per detection category; only categories with hits appear.
    pub anomaly_counts: IndexMap<Category, usize>,
}

impl Summary {
    /// Compute a summary with `top_n` entries in the ranked lists.
    ///
    /// Returns `None` for an empty store as the explicit no-data marker; a
    /// summary with undefined min/max timestamps is never produced.
    pub fn compute(store: &RecordStore, top_n: usize) -> Option<Self> {
        let (first_timestamp, last_timestamp) = aggregate::time_span(store)?;
        let span_days = (last_timestamp - first_timestamp).num_seconds() as f64 / 86_400.0;

        Some(Self {
            total_records: store.len(),
            first_timestamp,
            last_timestamp,
            span_days,
            top_client_addrs: aggregate::top_client_addrs(store, top_n),
            top_paths: aggregate::top_paths(store, top_n),
            status_codes: aggregate::status_distribution(store),
            methods: aggregate::method_distribution(store),
            total_bandwidth: aggregate::total_bandwidth(store),
            average_response_size: aggregate::average_response_size(store),
            anomaly_counts: anomaly::detect(store).counts(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RecordStore {
        let mut lines = vec![
            r#"192.168.1.1 - - [19/Apr/2023:10:00:00 +0000] "GET /index.html HTTP/1.1" 200 1000"#
                .to_string(),
            r#"192.168.1.1 - - [20/Apr/2023:22:00:00 +0000] "POST /api HTTP/1.1" 201 3000"#
                .to_string(),
        ];
        for minute in 0..11 {
            lines.push(format!(
                r#"192.168.1.200 - - [19/Apr/2023:11:{minute:02}:00 +0000] "GET /nope-{minute} HTTP/1.1" 404 100"#
            ));
        }
        RecordStore::ingest(lines)
    }

    #[test]
    fn test_empty_store_has_no_summary() {
        assert!(Summary::compute(&RecordStore::default(), 5).is_none());
    }

    #[test]
    fn test_summary_fields() {
        let summary = Summary::compute(&store(), 5).unwrap();
        assert_eq!(summary.total_records, 13);
        assert_eq!(
            summary.first_timestamp.format("%d %H:%M").to_string(),
            "19 10:00"
        );
        assert_eq!(
            summary.last_timestamp.format("%d %H:%M").to_string(),
            "20 22:00"
        );
        assert!((summary.span_days - 1.5).abs() < 1e-9);
        assert_eq!(summary.top_client_addrs[0].0, "192.168.1.200");
        assert_eq!(summary.top_client_addrs[0].1, 11);
        assert_eq!(summary.status_codes[&404], 11);
        assert_eq!(summary.methods["GET"], 12);
        assert_eq!(summary.total_bandwidth, 1000 + 3000 + 11 * 100);
        assert_eq!(summary.anomaly_counts[&Category::Excessive404], 11);
        assert!(!summary.anomaly_counts.contains_key(&Category::SqlInjection));
    }

    #[test]
    fn test_top_n_truncation() {
        let summary = Summary::compute(&store(), 1).unwrap();
        assert_eq!(summary.top_client_addrs.len(), 1);
        assert_eq!(summary.top_paths.len(), 1);
    }

    #[test]
    fn test_summary_is_json_serializable() {
        let json = serde_json::to_value(Summary::compute(&store(), 5).unwrap()).unwrap();
        assert_eq!(json["total_records"], 13);
        assert_eq!(json["status_codes"]["404"], 11);
        assert_eq!(json["anomaly_counts"]["excessive_404s"], 11);
        assert!(json["first_timestamp"].is_string());
    }
}
