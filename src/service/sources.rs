//! Source listing and source mutations.
//!
//! Source changes need administrative rights, so they run through the
//! elevation bridge; listing runs like any other query.

use tracing::{debug, info, warn};

use super::WingetService;
use crate::logic::classify::{Operation, conclude, fault};
use crate::parse::parse_sources;
use crate::state::{DEFAULT_SOURCE_NAME, OperationResult, PackageSource};
use crate::util::winget::WingetCommand;

const NAME_REQUIRED: &str = "Source name is required";
const URL_REQUIRED: &str = "Source URL/argument is required";
const UNSAFE_TEXT: &str = "Source values must not contain double quotes or line breaks";

/// What: Check that source values can be embedded in the elevated script.
///
/// Output:
/// - `Some(failure)` when any value holds `"`, `\r` or `\n`; cmd.exe has no
///   escape for a quote inside a quoted argument.
fn reject_unsafe(values: &[Option<&str>]) -> Option<OperationResult> {
    values
        .iter()
        .flatten()
        .any(|v| v.contains(['"', '\r', '\n']))
        .then(|| OperationResult::failure(UNSAFE_TEXT))
}

impl WingetService {
    /// What: List configured sources (`winget source list`).
    ///
    /// Output:
    /// - Sources in winget's order; empty on any fault.
    pub async fn list_sources(&self) -> Vec<PackageSource> {
        match self.query(WingetCommand::source_list()).await {
            Ok(out) => {
                let sources = parse_sources(&out.text);
                debug!(count = sources.len(), "parsed source listing");
                sources
            }
            Err(err) => {
                warn!(error = %err, "source query failed");
                Vec::new()
            }
        }
    }

    /// What: Register a new source, then refresh it.
    ///
    /// Inputs:
    /// - `name`: Source name
    /// - `url`: Source argument (URL or path)
    /// - `source_type`: Optional type such as `Microsoft.Rest`; blank is omitted
    ///
    /// Output:
    /// - Success on "successfully" or "added".
    ///
    /// Details:
    /// - After a successful add, `source update` runs so the new source is
    ///   searchable right away; its failure is logged but does not change the result.
    pub async fn add_source(&self, name: &str, url: &str, source_type: Option<&str>) -> OperationResult {
        let (name, url) = (name.trim(), url.trim());
        if name.is_empty() {
            return OperationResult::failure(NAME_REQUIRED);
        }
        if url.is_empty() {
            return OperationResult::failure(URL_REQUIRED);
        }
        if let Some(failure) = reject_unsafe(&[Some(name), Some(url), source_type]) {
            return failure;
        }
        let result = self
            .mutate_source(
                Operation::SourceAdd,
                name,
                WingetCommand::source_add(name, url, source_type),
            )
            .await;
        if result.success {
            let refreshed = self.update_source(name).await;
            if !refreshed.success {
                warn!(name, error = %refreshed.error_message, "new source added but refresh failed");
            }
        }
        result
    }

    /// What: Remove a source (`source remove --name "<n>"`).
    ///
    /// Output:
    /// - Success on "successfully" or "removed".
    pub async fn remove_source(&self, name: &str) -> OperationResult {
        let name = name.trim();
        if name.is_empty() {
            return OperationResult::failure(NAME_REQUIRED);
        }
        if let Some(failure) = reject_unsafe(&[Some(name)]) {
            return failure;
        }
        self.mutate_source(Operation::SourceRemove, name, WingetCommand::source_remove(name))
            .await
    }

    /// What: Refresh a source's index (`source update --name "<n>"`).
    ///
    /// Output:
    /// - Success on "successfully" or "updated".
    pub async fn update_source(&self, name: &str) -> OperationResult {
        let name = name.trim();
        if name.is_empty() {
            return OperationResult::failure(NAME_REQUIRED);
        }
        if let Some(failure) = reject_unsafe(&[Some(name)]) {
            return failure;
        }
        self.mutate_source(Operation::SourceUpdate, name, WingetCommand::source_update(name))
            .await
    }

    /// What: Reset a source to its defaults (`source reset --name "<n>"`).
    ///
    /// Output:
    /// - Success on "successfully" or "reset".
    pub async fn reset_source(&self, name: &str) -> OperationResult {
        let name = name.trim();
        if name.is_empty() {
            return OperationResult::failure(NAME_REQUIRED);
        }
        if let Some(failure) = reject_unsafe(&[Some(name)]) {
            return failure;
        }
        self.mutate_source(Operation::SourceReset, name, WingetCommand::source_reset(name))
            .await
    }

    /// What: Replace a source definition by removing it and adding the new one.
    ///
    /// Inputs:
    /// - `old_name`: Source to replace
    /// - `name`, `url`, `source_type`: New definition
    ///
    /// Output:
    /// - Success when both steps succeed; otherwise a failure naming the step.
    ///
    /// Details:
    /// - The built-in `winget` source is never edited; use `reset_source` instead.
    pub async fn edit_source(
        &self,
        old_name: &str,
        name: &str,
        url: &str,
        source_type: Option<&str>,
    ) -> OperationResult {
        let old_name = old_name.trim();
        if old_name.is_empty() || name.trim().is_empty() {
            return OperationResult::failure(NAME_REQUIRED);
        }
        if url.trim().is_empty() {
            return OperationResult::failure(URL_REQUIRED);
        }
        if let Some(failure) = reject_unsafe(&[Some(old_name), Some(name), Some(url), source_type]) {
            return failure;
        }
        if old_name.eq_ignore_ascii_case(DEFAULT_SOURCE_NAME) {
            return OperationResult::failure(format!(
                "The default source '{DEFAULT_SOURCE_NAME}' cannot be edited"
            ));
        }

        let removed = self.remove_source(old_name).await;
        if !removed.success {
            return OperationResult::failure(format!(
                "Edit failed while removing '{old_name}': {}",
                removed.error_message
            ))
            .with_output(removed.output)
            .with_exit_code(removed.exit_code);
        }
        let added = self.add_source(name, url, source_type).await;
        if !added.success {
            return OperationResult::failure(format!(
                "Edit removed '{old_name}' but failed while adding '{}': {}",
                name.trim(),
                added.error_message
            ))
            .with_output(added.output)
            .with_exit_code(added.exit_code);
        }
        OperationResult::success(format!("Source '{old_name}' updated to '{}'", name.trim()))
            .with_output(added.output)
            .with_exit_code(added.exit_code)
    }

    async fn mutate_source(&self, op: Operation, name: &str, command: WingetCommand) -> OperationResult {
        info!(operation = %op, name, command = %command.command_line(), "running source operation");
        let result = match self.execute_elevated(command).await {
            Ok(out) => conclude(op, name, &out),
            Err(err) => {
                warn!(operation = %op, name, error = %err, "source operation could not run");
                fault(op, &err)
            }
        };
        info!(operation = %op, name, success = result.success, "source operation finished");
        result
    }
}
