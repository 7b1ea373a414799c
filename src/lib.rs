//! `purchasing-power` library crate.
//!
//! The binary (`ppd`) is a thin wrapper around this library so that:
//!
//! - the series pipeline is testable without spawning processes
//! - loaders, exporters, and renderers stay swappable around the core
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod series;
