//! Utility functions for string formatting and manipulation.

pub mod format;

pub use format::{format_date, preview_line, truncate_string};
