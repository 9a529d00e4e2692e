//! Task list: plain CRUD over `tasks.json`

pub mod tracker;
pub mod types;

pub use tracker::TaskTracker;
pub use types::TaskUpdate;
