//! Dashboard assembly.
//!
//! - ordered raw inputs (`SourceSet`)
//! - progress reporting collaborator (`Reporter`)
//! - per-series pipeline + combined year table (`builder`, `combined`)

pub mod builder;
pub mod combined;
pub mod reporter;
pub mod sources;

pub use builder::*;
pub use combined::*;
pub use reporter::*;
pub use sources::*;
