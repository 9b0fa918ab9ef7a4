//! `AccessCrab`, a structured access log analysis core.
//!
//! Copyright (C) 2026 Daniel Freiermuth
//!
//! This program is free software: you can redistribute it and/or modify
//! it under the terms of the GNU General Public License as published by
//! the Free Software Foundation, either version 3 of the License, or
//! (at your option) any later version.
//!
//! This program is distributed in the hope that it will be useful,
//! but WITHOUT ANY WARRANTY; without even the implied warranty of
//! MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//! GNU General Public License for more details.
//!
//! You should have received a copy of the GNU General Public License
//! along with this program.  If not, see <https://www.gnu.org/licenses/>.
//!
//! AccessCrab turns raw Apache/Nginx-style access log text into an immutable
//! [`RecordStore`] of structured records, then derives filtered views
//! ([`core::filter`]), aggregate statistics ([`analysis`]) and heuristic
//! security detections ([`anomaly`]) from it.
//!
//! The crate is the analysis core only: it accepts already-decoded lines and
//! hands back plain data. File handling, argument parsing, and report
//! rendering belong to the callers consuming this API.
//!
//! ```
//! use accesscrab::{FilterCriteria, RecordStore, Summary};
//!
//! let store = RecordStore::ingest(
//!     r#"192.168.1.1 - - [19/Apr/2023:13:55:36 +0000] "GET /index.html HTTP/1.1" 200 2326"#
//!         .lines(),
//! );
//! assert_eq!(store.len(), 1);
//!
//! let gets = accesscrab::core::filter::apply(&store, &FilterCriteria::Method("get".into()))
//!     .expect("valid criteria");
//! let summary = Summary::compute(&gets, 10).expect("non-empty store");
//! assert_eq!(summary.total_records, 1);
//! ```

pub mod analysis;
pub mod anomaly;
pub mod core;
pub mod parser;

pub use crate::analysis::summary::Summary;
pub use crate::anomaly::{detect, Category, DetectionReport, DetectionRule};
pub use crate::core::filter::{FilterCriteria, FilterError};
pub use crate::core::record_store::{RecordStore, RejectedLine};
pub use crate::parser::record::LogRecord;
pub use crate::parser::{parse_line, Grammar, RejectReason};
