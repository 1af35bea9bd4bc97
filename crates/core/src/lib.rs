//! Core types for Congestion Watch: signal records, the line loader and the
//! timestamp-grouped index shared by the runtime and the views.

pub type SignalId = i64;
pub type CarCount = i64;

pub mod index;
pub mod loader;
pub mod record;

pub use index::GroupedIndex;
pub use loader::{load_records, parse_records, parse_str, LoadError};
pub use record::{LineError, SignalRecord};
