//! Command-line argument parsing and handling.

pub mod definition;
pub mod list;
pub mod output;
pub mod packages;
pub mod search;
pub mod sources;
pub mod status;
pub mod utils;

// Re-export commonly used items
pub use definition::{Args, Command, PackageArgs, SourceCommand, process_args};
pub use utils::determine_log_level;
