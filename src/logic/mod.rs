//! Pure decision logic: result filtering and output classification.

pub mod classify;
pub mod filter;

pub use classify::{Operation, Outcome, classify, conclude};
pub use filter::{filter_packages, matches};
