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

//! Filter predicates over a record store.
//!
//! Each application is a pure function from a store and one criterion to a
//! new, order-preserving sub-store. There is no combinator language:
//! composition is sequential application by the caller, filter-of-filter.

use crate::core::record_store::RecordStore;
use crate::parser::record::LogRecord;
use chrono::NaiveDateTime;
use fancy_regex::Regex;
use thiserror::Error;

/// One filter predicate. One variant per supported criterion; matching is
/// explicit, never by reflective field lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterCriteria {
    /// Exact client address match.
    ClientAddr(String),
    /// Case-insensitive HTTP method match.
    Method(String),
    /// Exact status code match.
    Status(u16),
    /// Inclusive status code range.
    StatusRange { start: u16, end: u16 },
    /// Regex searched anywhere in the path (not a full match).
    PathPattern(String),
    /// Inclusive time range on the record timestamp.
    TimeRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// A criterion that cannot be evaluated. The source store stays valid and
/// other filters can still be applied to it.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid path pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: Box<fancy_regex::Error>,
    },
    #[error("invalid time range: start {start} is after end {end}")]
    InvalidTimeRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("invalid status range: start {start} is after end {end}")]
    InvalidStatusRange { start: u16, end: u16 },
}

/// Apply one criterion, producing a new sub-store.
///
/// Relative record order is preserved: the result is always a subsequence of
/// the source. The source store is not modified.
pub fn apply(store: &RecordStore, criteria: &FilterCriteria) -> Result<RecordStore, FilterError> {
    let matched: Vec<LogRecord> = match criteria {
        FilterCriteria::ClientAddr(addr) => collect(store, |r| r.client_addr == *addr),
        FilterCriteria::Method(method) => {
            // Stored methods are uppercase; normalize the query side.
            collect(store, |r| r.method.eq_ignore_ascii_case(method))
        }
        FilterCriteria::Status(code) => collect(store, |r| r.status == *code),
        FilterCriteria::StatusRange { start, end } => {
            if start > end {
                return Err(FilterError::InvalidStatusRange {
                    start: *start,
                    end: *end,
                });
            }
            collect(store, |r| (*start..=*end).contains(&r.status))
        }
        FilterCriteria::PathPattern(pattern) => {
            let regex = Regex::new(pattern).map_err(|source| FilterError::InvalidPattern {
                pattern: pattern.clone(),
                source: Box::new(source),
            })?;
            collect(store, |r| regex.is_match(&r.path).unwrap_or(false))
        }
        FilterCriteria::TimeRange { start, end } => {
            if start > end {
                return Err(FilterError::InvalidTimeRange {
                    start: *start,
                    end: *end,
                });
            }
            collect(store, |r| r.timestamp >= *start && r.timestamp <= *end)
        }
    };

    Ok(RecordStore::from_records(matched))
}

fn collect<P>(store: &RecordStore, predicate: P) -> Vec<LogRecord>
where
    P: Fn(&LogRecord) -> bool,
{
    store
        .iter()
        .filter(|record| predicate(record))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 4, 19)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn store() -> RecordStore {
        let lines = [
            r#"192.168.1.1 - - [19/Apr/2023:10:00:00 +0000] "GET /index.html HTTP/1.1" 200 100"#,
            r#"10.0.0.1 - - [19/Apr/2023:11:00:00 +0000] "POST /api/data HTTP/1.1" 201 200"#,
            r#"192.168.1.1 - - [19/Apr/2023:12:00:00 +0000] "GET /admin/login.php HTTP/1.1" 404 300"#,
            r#"10.0.0.2 - - [19/Apr/2023:13:00:00 +0000] "DELETE /api/data/1 HTTP/1.1" 500 400"#,
        ];
        RecordStore::ingest(lines)
    }

    #[test]
    fn test_filter_by_client_addr() {
        let filtered = apply(&store(), &FilterCriteria::ClientAddr("192.168.1.1".into())).unwrap();
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.client_addr == "192.168.1.1"));
    }

    #[test]
    fn test_filter_by_method_is_case_insensitive() {
        let filtered = apply(&store(), &FilterCriteria::Method("post".into())).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.records()[0].method, "POST");
    }

    #[test]
    fn test_filter_by_status() {
        let filtered = apply(&store(), &FilterCriteria::Status(404)).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.records()[0].path, "/admin/login.php");
    }

    #[test]
    fn test_filter_by_status_range_is_inclusive() {
        let filtered = apply(
            &store(),
            &FilterCriteria::StatusRange {
                start: 200,
                end: 201,
            },
        )
        .unwrap();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_filter_by_path_pattern_searches_anywhere() {
        let filtered = apply(&store(), &FilterCriteria::PathPattern("api".into())).unwrap();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_filter_by_time_range_is_inclusive() {
        let filtered = apply(
            &store(),
            &FilterCriteria::TimeRange {
                start: ts(11, 0),
                end: ts(12, 0),
            },
        )
        .unwrap();
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.records()[0].path, "/api/data");
        assert_eq!(filtered.records()[1].path, "/admin/login.php");
    }

    #[test]
    fn test_filter_preserves_order() {
        let filtered = apply(&store(), &FilterCriteria::Method("GET".into())).unwrap();
        let paths: Vec<&str> = filtered.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["/index.html", "/admin/login.php"]);
    }

    #[test]
    fn test_sequential_composition() {
        let source = store();
        let by_addr = apply(&source, &FilterCriteria::ClientAddr("192.168.1.1".into())).unwrap();
        let by_status = apply(&by_addr, &FilterCriteria::Status(404)).unwrap();
        assert_eq!(by_status.len(), 1);
        // Source stores are untouched by derived filtering.
        assert_eq!(source.len(), 4);
        assert_eq!(by_addr.len(), 2);
    }

    #[test]
    fn test_invalid_pattern_is_a_typed_error() {
        let source = store();
        let err = apply(&source, &FilterCriteria::PathPattern("[unclosed".into())).unwrap_err();
        assert!(matches!(err, FilterError::InvalidPattern { .. }));
        // The store remains usable after a failed filter.
        assert_eq!(
            apply(&source, &FilterCriteria::Status(200)).unwrap().len(),
            1
        );
    }

    #[test]
    fn test_inverted_time_range_is_a_typed_error() {
        let err = apply(
            &store(),
            &FilterCriteria::TimeRange {
                start: ts(12, 0),
                end: ts(11, 0),
            },
        )
        .unwrap_err();
        assert!(matches!(err, FilterError::InvalidTimeRange { .. }));
    }

    #[test]
    fn test_inverted_status_range_is_a_typed_error() {
        let err = apply(
            &store(),
            &FilterCriteria::StatusRange {
                start: 500,
                end: 200,
            },
        )
        .unwrap_err();
        assert!(matches!(err, FilterError::InvalidStatusRange { .. }));
    }
}
