//! Terminal reporting: dashboard summary and combined year table.

pub mod format;

pub use format::*;
