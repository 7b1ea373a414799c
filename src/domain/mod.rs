//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - series identity and per-series parameters (`SeriesId`, `SeriesSpec`, `SpecTable`)
//! - the series shapes produced by each stage (`Series`, `AffordabilitySeries`,
//!   `AnnualSeries`, `RebasedSeries`)
//! - the run configuration (`DashboardConfig`)

pub mod types;

pub use types::*;
