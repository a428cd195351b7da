//! Package listings and mutations through `WingetService`.

use std::time::{Duration, Instant};

use wingetctl::state::{PackageStatus, SearchFilterType};
use wingetctl::{ServiceConfig, WingetService};

use crate::fake_winget::FakeWinget;

#[tokio::test]
/// What: `list_installed` runs `winget list` and parses the table behind a spinner.
///
/// Inputs:
/// - Fake printing spinner frames, then a two-row installed table
///
/// Output:
/// - Two installed packages; the first carries its available version
async fn list_installed_parses_table() {
    let fake = FakeWinget::new();
    let pkgs = fake.service().list_installed().await;
    assert_eq!(pkgs.len(), 2, "{pkgs:?}");
    assert_eq!(pkgs[0].id, "Git.Git");
    assert_eq!(pkgs[0].status, PackageStatus::Installed);
    assert_eq!(pkgs[0].available_version.as_deref(), Some("2.45.1"));
    assert_eq!(pkgs[1].name, "Contoso Tool");
    assert_eq!(fake.calls(), vec!["list"]);
}

#[tokio::test]
/// What: `list_upgradable` runs bare `winget upgrade`.
///
/// Inputs:
/// - Upgrade table with a blank Available cell and a footer line
///
/// Output:
/// - Two records with status UpdateAvailable; blank available defaults to version
async fn list_upgradable_defaults_available() {
    let fake = FakeWinget::new();
    let pkgs = fake.service().list_upgradable().await;
    assert_eq!(pkgs.len(), 2, "{pkgs:?}");
    assert!(pkgs.iter().all(|p| p.status == PackageStatus::UpdateAvailable));
    assert_eq!(pkgs[1].available_version.as_deref(), Some("3.1"));
    assert_eq!(fake.calls(), vec!["upgrade"]);
}

#[tokio::test]
/// What: Advanced search narrows winget's results locally.
///
/// Inputs:
/// - Search returning three packages; filters by name, by id and exact id
///
/// Output:
/// - Only the matching subsets, order preserved
async fn search_advanced_filters_results() {
    let fake = FakeWinget::new();
    let svc = fake.service();
    assert_eq!(svc.search("code").await.len(), 3);

    let by_name = svc.search_advanced("code", SearchFilterType::Name, false).await;
    let names: Vec<&str> = by_name.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Visual Studio Code", "Code Runner"]);

    let exact = svc
        .search_advanced("vscodium.vscodium", SearchFilterType::Id, true)
        .await;
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].status, PackageStatus::Available);

    assert_eq!(fake.calls()[0], "search code");
}

#[tokio::test]
/// What: Install reports success, no-op success and failure with raw output.
///
/// Inputs:
/// - Ids the fake installs, already has, and does not know
///
/// Output:
/// - Success, success, failure carrying stderr text and exit code 20
async fn install_outcomes() {
    let fake = FakeWinget::new();
    let svc = fake.service();

    let ok = svc.install("Git.Git", true).await;
    assert!(ok.success, "{ok:?}");
    assert_eq!(ok.message, "Package Git.Git installed successfully");

    let unchanged = svc.install("Contoso.Tool", false).await;
    assert!(unchanged.success);
    assert!(unchanged.message.contains("already installed"));

    let missing = svc.install("No.Such", false).await;
    assert!(!missing.success);
    assert!(missing.output.contains("No package found matching input criteria."));
    assert_eq!(missing.exit_code, Some(20));

    let calls = fake.calls();
    assert_eq!(
        calls[0],
        "install --id Git.Git --accept-package-agreements --accept-source-agreements --silent --disable-interactivity"
    );
    assert_eq!(
        calls[1],
        "install --id Contoso.Tool --accept-package-agreements --accept-source-agreements"
    );
}

#[tokio::test]
/// What: Update and uninstall use their own success phrases.
///
/// Inputs:
/// - Update of an outdated and an up-to-date package; uninstall of known and unknown ids
///
/// Output:
/// - Matching success flags
async fn update_and_uninstall_outcomes() {
    let fake = FakeWinget::new();
    let svc = fake.service();
    assert!(svc.update("Git.Git", false).await.success);
    let latest = svc.update("Contoso.Tool", false).await;
    assert!(latest.success);
    assert!(latest.message.contains("already the latest"));
    assert!(!svc.update("No.Such", false).await.success);

    assert!(svc.uninstall("Git.Git", false).await.success);
    let gone = svc.uninstall("No.Such", true).await;
    assert!(!gone.success);
    assert_eq!(gone.error_message, "Uninstall may have failed");
    assert_eq!(gone.exit_code, Some(1));
}

#[tokio::test]
/// What: Blank ids fail fast without running winget.
///
/// Inputs:
/// - Whitespace-only id for install, update and uninstall
///
/// Output:
/// - `Package identifier is required` and no recorded calls
async fn blank_id_is_rejected() {
    let fake = FakeWinget::new();
    let svc = fake.service();
    for result in [
        svc.install("  ", false).await,
        svc.update("", false).await,
        svc.uninstall("\t", false).await,
    ] {
        assert!(!result.success);
        assert_eq!(result.error_message, "Package identifier is required");
    }
    assert!(fake.calls().is_empty());
}

#[tokio::test]
/// What: A missing executable yields empty reads and failure results.
///
/// Inputs:
/// - Service pointed at a path that does not exist
///
/// Output:
/// - Empty listing; install fails with `Installation failed:` prefix
async fn missing_executable_degrades() {
    let dir = tempfile::tempdir().expect("tempdir");
    let svc = WingetService::new(ServiceConfig {
        winget_path: Some(dir.path().join("absent-winget")),
        ..ServiceConfig::default()
    });
    assert!(svc.list_installed().await.is_empty());
    assert!(svc.list_sources().await.is_empty());
    let r = svc.install("Git.Git", false).await;
    assert!(!r.success);
    assert!(r.error_message.starts_with("Installation failed:"), "{}", r.error_message);
}

#[tokio::test]
/// What: Read queries respect the query timeout.
///
/// Inputs:
/// - Fake that sleeps five seconds; timeout of 300 ms
///
/// Output:
/// - Empty listing returned well before the fake would finish
async fn query_timeout_yields_empty_listing() {
    let fake = FakeWinget::hanging();
    let svc = fake.service_with_timeout(Some(Duration::from_millis(300)));
    let started = Instant::now();
    assert!(svc.list_installed().await.is_empty());
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
/// What: The monitor built from the service probes the same executable.
///
/// Inputs:
/// - Fake answering `--version`
///
/// Output:
/// - Connected, and a `--version` call recorded
async fn connection_monitor_uses_service_program() {
    let fake = FakeWinget::new();
    let monitor = fake.service().connection_monitor(Duration::from_secs(5));
    assert_eq!(monitor.check().await, wingetctl::state::ConnectionStatus::Connected);
    assert_eq!(fake.calls(), vec!["--version"]);
}
