//! Input/output helpers.
//!
//! - CSV ingest of raw price series (`ingest`)
//! - table exports (CSV/JSON) and dashboard reload (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
