//! Utility functions for terminal formatting.

pub mod format;

pub use format::{format_optional, format_timestamp, truncate_string, MISSING};
