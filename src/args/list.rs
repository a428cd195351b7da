//! Command-line package listing.

use super::output::{packages_table, to_json};
use crate::service::WingetService;

/// What: Print installed (or upgradable) packages.
///
/// Inputs:
/// - `service`: winget facade
/// - `upgradable`: List upgrade candidates instead of everything installed
/// - `json`: Print JSON instead of a table
///
/// Output:
/// - Always `true`; an unreachable winget yields an empty listing.
pub async fn handle_list(service: &WingetService, upgradable: bool, json: bool) -> bool {
    tracing::info!(upgradable, json, "list requested from CLI");
    let packages = if upgradable {
        service.list_upgradable().await
    } else {
        service.list_installed().await
    };
    if json {
        println!("{}", to_json(&packages));
    } else if packages.is_empty() {
        println!("No packages found.");
    } else {
        print!("{}", packages_table(&packages));
        println!("{} package(s)", packages.len());
    }
    true
}
