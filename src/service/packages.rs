//! Package listings, search and install/update/uninstall.

use tracing::{info, warn};

use super::WingetService;
use crate::logic::classify::{Operation, conclude, fault};
use crate::logic::filter::filter_packages;
use crate::parse::{PackageTable, parse_packages};
use crate::state::{OperationResult, Package, SearchFilterType};
use crate::util::winget::WingetCommand;

impl WingetService {
    /// What: List installed packages (`winget list`).
    ///
    /// Output:
    /// - Packages with status `Installed`; empty on any fault.
    pub async fn list_installed(&self) -> Vec<Package> {
        self.read_packages(WingetCommand::list(), PackageTable::Installed)
            .await
    }

    /// What: List packages with a newer version (`winget upgrade`).
    ///
    /// Output:
    /// - Packages with status `UpdateAvailable`; empty on any fault.
    pub async fn list_upgradable(&self) -> Vec<Package> {
        self.read_packages(WingetCommand::upgrade_listing(), PackageTable::Upgrades)
            .await
    }

    /// What: Search the configured sources (`winget search "<query>"`).
    ///
    /// Inputs:
    /// - `query`: Search text passed to winget
    ///
    /// Output:
    /// - Packages with status `Available`; empty on any fault.
    pub async fn search(&self, query: &str) -> Vec<Package> {
        self.read_packages(WingetCommand::search(query), PackageTable::Search)
            .await
    }

    /// What: Search, then narrow the results by name and/or id.
    ///
    /// Inputs:
    /// - `query`: Search text, also used for the local filter
    /// - `filter`: Field(s) the local filter inspects
    /// - `exact`: Require whole-field equality
    ///
    /// Output:
    /// - Matching packages in winget's order.
    pub async fn search_advanced(
        &self,
        query: &str,
        filter: SearchFilterType,
        exact: bool,
    ) -> Vec<Package> {
        let found = self.search(query).await;
        let total = found.len();
        let kept = filter_packages(found, query, filter, exact);
        tracing::debug!(query, ?filter, exact, total, kept = kept.len(), "filtered search results");
        kept
    }

    /// What: Install a package by id.
    ///
    /// Inputs:
    /// - `id`: Package identifier
    /// - `silent`: Add `--silent --disable-interactivity`
    ///
    /// Output:
    /// - Success on "Successfully installed" or "already installed".
    pub async fn install(&self, id: &str, silent: bool) -> OperationResult {
        self.mutate_package(Operation::Install, id, |id| {
            WingetCommand::install(id, silent)
        })
        .await
    }

    /// What: Upgrade a package by id.
    ///
    /// Inputs:
    /// - `id`: Package identifier
    /// - `silent`: Add `--silent --disable-interactivity`
    ///
    /// Output:
    /// - Success on "Successfully installed" or "already the latest".
    pub async fn update(&self, id: &str, silent: bool) -> OperationResult {
        self.mutate_package(Operation::Update, id, |id| {
            WingetCommand::upgrade(id, silent)
        })
        .await
    }

    /// What: Uninstall a package by id.
    ///
    /// Inputs:
    /// - `id`: Package identifier
    /// - `silent`: Add `--silent --disable-interactivity`
    ///
    /// Output:
    /// - Success on "Successfully uninstalled".
    pub async fn uninstall(&self, id: &str, silent: bool) -> OperationResult {
        self.mutate_package(Operation::Uninstall, id, |id| {
            WingetCommand::uninstall(id, silent)
        })
        .await
    }

    async fn read_packages(&self, command: WingetCommand, table: PackageTable) -> Vec<Package> {
        let line = command.command_line();
        match self.query(command).await {
            Ok(out) => {
                let packages = parse_packages(&out.text, table);
                tracing::debug!(command = %line, count = packages.len(), "parsed package listing");
                packages
            }
            Err(err) => {
                warn!(command = %line, error = %err, "package query failed");
                Vec::new()
            }
        }
    }

    async fn mutate_package(
        &self,
        op: Operation,
        id: &str,
        build: impl FnOnce(&str) -> WingetCommand,
    ) -> OperationResult {
        let id = id.trim();
        if id.is_empty() {
            return OperationResult::failure("Package identifier is required");
        }
        let command = build(id);
        info!(operation = %op, id, command = %command.command_line(), "running package operation");
        let result = match self.execute(command).await {
            Ok(out) => conclude(op, id, &out),
            Err(err) => {
                warn!(operation = %op, id, error = %err, "package operation could not run");
                fault(op, &err)
            }
        };
        info!(operation = %op, id, success = result.success, exit_code = ?result.exit_code, "package operation finished");
        result
    }
}
