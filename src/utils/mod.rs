//! Utility functions for amount parsing and display formatting.

pub mod format;

pub use format::{format_amount, parse_amount};
