//! Utility functions and helpers

mod time;

pub use time::{current_timestamp, current_timestamp_millis, format_timestamp, whole_days_between};
