//! Command-line search.

use super::output::{packages_table, to_json};
use crate::service::WingetService;
use crate::state::SearchFilterType;

/// What: Search winget and print the filtered matches.
///
/// Inputs:
/// - `service`: winget facade
/// - `query`: Search text
/// - `filter`, `exact`: Local narrowing applied to winget's results
/// - `json`: Print JSON instead of a table
///
/// Output:
/// - Always `true`; no matches is not an error.
pub async fn handle_search(
    service: &WingetService,
    query: &str,
    filter: SearchFilterType,
    exact: bool,
    json: bool,
) -> bool {
    tracing::info!(query, ?filter, exact, "search requested from CLI");
    let packages = service.search_advanced(query, filter, exact).await;
    if json {
        println!("{}", to_json(&packages));
    } else if packages.is_empty() {
        println!("No packages match '{query}'.");
    } else {
        print!("{}", packages_table(&packages));
    }
    true
}
