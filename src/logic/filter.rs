//! Client-side narrowing of search results by name and/or id.

use crate::state::{Package, SearchFilterType};

/// What: Test one package against a query.
///
/// Inputs:
/// - `pkg`: Candidate package
/// - `query`: Text to look for
/// - `filter`: Field(s) to inspect
/// - `exact`: Whole-field equality instead of substring containment
///
/// Output:
/// - `true` when the selected field(s) match.
///
/// Details:
/// - Comparison is case-insensitive (Unicode lowercase on both sides).
/// - An empty query is contained in every field, so a partial match with
///   an empty query accepts everything.
#[must_use]
pub fn matches(pkg: &Package, query: &str, filter: SearchFilterType, exact: bool) -> bool {
    let needle = query.to_lowercase();
    let hit = |field: &str| {
        let hay = field.to_lowercase();
        if exact { hay == needle } else { hay.contains(&needle) }
    };
    match filter {
        SearchFilterType::Name => hit(&pkg.name),
        SearchFilterType::Id => hit(&pkg.id),
        SearchFilterType::Both => hit(&pkg.name) || hit(&pkg.id),
    }
}

/// What: Keep the packages that match `query`.
///
/// Inputs:
/// - `packages`: Candidates in upstream order
/// - `query`, `filter`, `exact`: As for [`matches`]
///
/// Output:
/// - Matching packages, order preserved, no ranking.
#[must_use]
pub fn filter_packages(
    packages: Vec<Package>,
    query: &str,
    filter: SearchFilterType,
    exact: bool,
) -> Vec<Package> {
    packages
        .into_iter()
        .filter(|p| matches(p, query, filter, exact))
        .collect()
}
