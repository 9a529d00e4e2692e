//! Flat-file JSON persistence shared by every dashboard collection.
//!
//! Each collection lives in its own document which is read in full, mutated in
//! memory and written back in full on every operation.

pub mod json_file;

pub use json_file::{JsonFileStore, StoreError};

/// Store for an ordered sequence of records (tasks, reminders)
pub type RecordStore<R> = JsonFileStore<Vec<R>>;
