//! Search filtering over package records.

use wingetctl::logic::{filter_packages, matches};
use wingetctl::state::{Package, PackageStatus, SearchFilterType};

fn catalog() -> Vec<Package> {
    [
        ("Microsoft.VisualStudioCode", "Visual Studio Code"),
        ("VSCodium.VSCodium", "VSCodium"),
        ("Git.Git", "Git"),
        ("GitHub.GitHubDesktop", "GitHub Desktop"),
        ("Example.CodeRunner", "Code Runner"),
    ]
    .into_iter()
    .map(|(id, name)| Package::new(id, name, "1.0", "winget", PackageStatus::Available))
    .collect()
}

const FILTERS: [SearchFilterType; 3] = [
    SearchFilterType::Name,
    SearchFilterType::Id,
    SearchFilterType::Both,
];

#[test]
/// What: Exact results are always a subset of partial results.
///
/// Inputs:
/// - Several queries under every filter type
///
/// Output:
/// - Every exact match also matches partially
fn exact_is_subset_of_partial() {
    for query in ["git", "Git.Git", "code", "VSCodium", "", "studio"] {
        for filter in FILTERS {
            let partial = filter_packages(catalog(), query, filter, false);
            for pkg in filter_packages(catalog(), query, filter, true) {
                assert!(
                    partial.iter().any(|p| p.id == pkg.id),
                    "{} exact but not partial for {query:?} {filter:?}",
                    pkg.id
                );
            }
        }
    }
}

#[test]
/// What: An empty partial query keeps everything.
///
/// Inputs:
/// - `""` with every filter type
///
/// Output:
/// - Whole catalog, order preserved
fn empty_query_keeps_all() {
    for filter in FILTERS {
        let kept = filter_packages(catalog(), "", filter, false);
        let ids: Vec<&str> = kept.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 5);
        assert_eq!(ids[0], "Microsoft.VisualStudioCode");
    }
    let vscode = &catalog()[0];
    assert!(matches(vscode, "", SearchFilterType::Both, false));
}

#[test]
/// What: Filter types inspect only their field, ignoring case.
///
/// Inputs:
/// - `github` by name, by id and by both
///
/// Output:
/// - Name filter finds the desktop app only; id filter finds it too;
///   exact id matches ignore case
fn field_selection_and_case() {
    let by_name = filter_packages(catalog(), "GITHUB", SearchFilterType::Name, false);
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, "GitHub.GitHubDesktop");

    let by_id = filter_packages(catalog(), "github", SearchFilterType::Id, false);
    assert_eq!(by_id.len(), 1);

    let exact = filter_packages(catalog(), "git.git", SearchFilterType::Id, true);
    assert_eq!(exact.len(), 1);
    assert!(filter_packages(catalog(), "git.git", SearchFilterType::Name, true).is_empty());

    let both = filter_packages(catalog(), "code", SearchFilterType::Both, false);
    let ids: Vec<&str> = both.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["Microsoft.VisualStudioCode", "Example.CodeRunner"]);
}
