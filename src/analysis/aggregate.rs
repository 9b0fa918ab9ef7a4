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

//! Aggregate statistics over a record store.
//!
//! All functions are pure: they derive values from the store and never
//! mutate it. Empty-store outputs are defined (zero, empty collection),
//! never errors or NaN.

use crate::core::record_store::RecordStore;
use crate::parser::record::LogRecord;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Frequency-rank the values of one record field.
///
/// Counting uses an order-preserving map, so equal counts rank in
/// first-encountered order and the tie-break is reproducible across runs,
/// which a hash map would not give. The sort is stable for the same reason.
fn top_by_key<F>(store: &RecordStore, n: usize, key: F) -> Vec<(String, usize)>
where
    F: Fn(&LogRecord) -> &str,
{
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for record in store {
        *counts.entry(key(record)).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// The N most frequent client addresses, most requests first.
pub fn top_client_addrs(store: &RecordStore, n: usize) -> Vec<(String, usize)> {
    top_by_key(store, n, |r| &r.client_addr)
}

/// The N most frequently requested paths, most requests first.
pub fn top_paths(store: &RecordStore, n: usize) -> Vec<(String, usize)> {
    top_by_key(store, n, |r| &r.path)
}

/// Full status code distribution, keyed in first-encountered order.
pub fn status_distribution(store: &RecordStore) -> IndexMap<u16, usize> {
    let mut counts = IndexMap::new();
    for record in store {
        *counts.entry(record.status).or_insert(0) += 1;
    }
    counts
}

/// Full HTTP method distribution, keyed in first-encountered order.
pub fn method_distribution(store: &RecordStore) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for record in store {
        *counts.entry(record.method.clone()).or_insert(0) += 1;
    }
    counts
}

/// Request counts bucketed by hour of day.
///
/// All 24 buckets are always present (zero-filled), independent of which
/// hours actually occur in the data.
pub fn hourly_distribution(store: &RecordStore) -> [usize; 24] {
    let mut buckets = [0usize; 24];
    for record in store {
        buckets[record.timestamp.hour() as usize] += 1;
    }
    buckets
}

/// Request counts bucketed by calendar date, ascending.
///
/// Only dates present in the data appear.
pub fn daily_distribution(store: &RecordStore) -> BTreeMap<NaiveDate, usize> {
    let mut counts = BTreeMap::new();
    for record in store {
        *counts.entry(record.timestamp.date()).or_insert(0) += 1;
    }
    counts
}

/// Sum of response sizes in bytes. 0 for an empty store.
pub fn total_bandwidth(store: &RecordStore) -> u64 {
    store.iter().map(|r| r.response_size).sum()
}

/// Mean response size in bytes. Defined as 0 for an empty store.
pub fn average_response_size(store: &RecordStore) -> f64 {
    if store.is_empty() {
        return 0.0;
    }
    total_bandwidth(store) as f64 / store.len() as f64
}

/// Earliest and latest record timestamps, or `None` for an empty store.
pub fn time_span(store: &RecordStore) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let first = store.iter().map(|r| r.timestamp).min()?;
    let last = store.iter().map(|r| r.timestamp).max()?;
    Some((first, last))
}
