//! Reminders: dated items whose urgency tier is derived from the due date
//!
//! Urgency is recomputed against the current date every time reminders are
//! read, and the list is re-sorted by tier then due date on every call.

pub mod engine;
pub mod types;
pub mod urgency;

pub use engine::ReminderEngine;
