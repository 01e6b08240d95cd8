pub mod lifecycle;
pub mod store;

pub use lifecycle::{commit, HistoryLifecycle};
pub use store::{DayRecords, ExclusionSet, HistoryError, HistoryFile, HistoryStore, SelectionRecord};
