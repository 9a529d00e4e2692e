//! Daily goals: up to three goals that belong to a single calendar day
//!
//! The stored day is reset lazily: the first operation that sees a date other
//! than today replaces it with an empty day and writes it back.

pub mod day;
pub mod tracker;

pub use tracker::GoalsTracker;
