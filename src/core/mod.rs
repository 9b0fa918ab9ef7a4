pub mod filter;
pub mod record_store;

pub use filter::{FilterCriteria, FilterError};
pub use record_store::{RecordStore, RejectedLine};
