//! The per-series transformation stages.
//!
//! Each stage is a pure function from one series shape to the next:
//!
//! - merge historical/current segments into one series (`merge`)
//! - invert prices into units per fixed amount (`affordability`)
//! - collapse to one point per calendar year (`resample`)
//! - express each year as a percentage of a baseline year (`rebase`)

pub mod affordability;
pub mod merge;
pub mod rebase;
pub mod resample;

pub use affordability::*;
pub use merge::*;
pub use rebase::*;
pub use resample::*;
