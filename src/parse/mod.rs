//! Turning winget's column-aligned text output into records.
//!
//! Parsing never fails: unrecognised lines are skipped and rows that do not
//! line up with their header fall back to whitespace splitting.

pub mod packages;
pub mod sources;
pub mod table;

pub use packages::{PackageTable, parse_packages};
pub use sources::parse_sources;
