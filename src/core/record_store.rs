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

use crate::parser::record::LogRecord;
use crate::parser::{self, RejectReason};
use rayon::prelude::*;
use tracing::{debug, info};

/// How much of a rejected line is retained for diagnostics.
const EXCERPT_CHARS: usize = 50;

/// Diagnostic for one line that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based position in the ingested input.
    pub line_number: usize,
    /// First [`EXCERPT_CHARS`] characters of the offending line.
    pub excerpt: String,
    pub reason: RejectReason,
}

/// The ordered, immutable collection of all successfully parsed records from
/// one ingestion run, plus diagnostics for the lines that were rejected.
///
/// Record order is input line order; the store is never re-sorted and never
/// mutated after construction. Filtering and aggregation return new
/// collections/values, so interleaved analysis passes always observe a
/// consistent snapshot.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<LogRecord>,
    rejected: Vec<RejectedLine>,
}

impl RecordStore {
    /// Parse a finite sequence of raw lines into a store.
    ///
    /// Blank lines are skipped without being counted as rejections. Malformed
    /// lines are skipped, counted, and retained as [`RejectedLine`]
    /// diagnostics; they never abort ingestion of the rest of the input.
    /// Empty input yields an empty store.
    ///
    /// Lines are parsed in parallel; the indexed collect restores input
    /// order, so the resulting store is identical to a sequential pass.
    pub fn ingest<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let numbered: Vec<(usize, String)> = lines
            .into_iter()
            .enumerate()
            .filter_map(|(idx, line)| {
                let line = line.as_ref();
                if line.trim().is_empty() {
                    None
                } else {
                    Some((idx + 1, line.to_string()))
                }
            })
            .collect();

        let outcomes: Vec<(usize, String, Result<LogRecord, RejectReason>)> = numbered
            .into_par_iter()
            .map(|(number, line)| {
                let outcome = parser::parse_line(&line);
                (number, line, outcome)
            })
            .collect();

        let mut records = Vec::with_capacity(outcomes.len());
        let mut rejected = Vec::new();
        for (line_number, line, outcome) in outcomes {
            match outcome {
                Ok(record) => records.push(record),
                Err(reason) => {
                    debug!("rejected line {line_number}: {reason}");
                    rejected.push(RejectedLine {
                        line_number,
                        excerpt: line.chars().take(EXCERPT_CHARS).collect(),
                        reason,
                    });
                }
            }
        }

        info!(
            "{} lines loaded, {} lines skipped",
            records.len(),
            rejected.len()
        );

        Self { records, rejected }
    }

    /// Build a store directly from already-parsed records.
    ///
    /// Used for derived (filtered) stores; these carry no rejection
    /// diagnostics, which belong to the original ingestion run.
    pub fn from_records(records: Vec<LogRecord>) -> Self {
        Self {
            records,
            rejected: Vec::new(),
        }
    }

    /// All records, in input line order.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogRecord> {
        self.records.iter()
    }

    /// Number of parsed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Diagnostics for the lines this store's ingestion run rejected.
    pub fn rejected(&self) -> &[RejectedLine] {
        &self.rejected
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a LogRecord;
    type IntoIter = std::slice::Iter<'a, LogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
