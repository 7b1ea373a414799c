//! Chart rendering: terminal (`ascii`) and file-based (`svg`).

pub mod ascii;
pub mod svg;

pub use ascii::*;
pub use svg::*;
