//! Command-line install, update and uninstall.

use super::definition::PackageArgs;
use super::output::result_line;
use super::utils::{effective_silent, parse_package_ids};
use crate::config::Settings;
use crate::service::WingetService;
use crate::state::OperationResult;

/// Package mutation requested on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackageAction {
    /// `wingetctl install`
    Install,
    /// `wingetctl update`
    Update,
    /// `wingetctl uninstall`
    Uninstall,
}

impl PackageAction {
    async fn run(self, service: &WingetService, id: &str, silent: bool) -> OperationResult {
        match self {
            Self::Install => service.install(id, silent).await,
            Self::Update => service.update(id, silent).await,
            Self::Uninstall => service.uninstall(id, silent).await,
        }
    }
}

/// What: Apply `action` to every requested id, one after another.
///
/// Inputs:
/// - `service`: winget facade
/// - `action`: Install, update or uninstall
/// - `args`: Ids and silent/interactive flags
/// - `settings`: Supplies `silent_by_default`
///
/// Output:
/// - `true` only when every id succeeded.
///
/// Details:
/// - Prints one result line per id and a summary when more than one id was given.
/// - Raw winget output of failures is printed to stderr.
pub async fn handle_packages(
    service: &WingetService,
    action: PackageAction,
    args: &PackageArgs,
    settings: &Settings,
) -> bool {
    let ids = parse_package_ids(&args.ids);
    let silent = effective_silent(args.silent, args.interactive, settings.silent_by_default);
    tracing::info!(?action, ids = ?ids, silent, "package operation requested from CLI");

    let mut failed = 0usize;
    for id in &ids {
        let result = action.run(service, id, silent).await;
        println!("{id}: {}", result_line(&result));
        if !result.success {
            failed += 1;
            if !result.output.trim().is_empty() {
                eprintln!("{}", result.output.trim_end());
            }
        }
    }
    if ids.len() > 1 {
        println!("{} succeeded, {failed} failed", ids.len() - failed);
    }
    failed == 0
}
