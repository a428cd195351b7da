//! Command-line source management.

use super::definition::SourceCommand;
use super::output::{result_line, sources_table, to_json};
use crate::service::WingetService;
use crate::state::{DEFAULT_SOURCE_NAME, OperationResult};

/// What: Run a `source` subcommand.
///
/// Inputs:
/// - `service`: winget facade
/// - `cmd`: Parsed subcommand
///
/// Output:
/// - `true` when the operation succeeded (listing always succeeds).
///
/// Details:
/// - Removing the built-in `winget` source requires `--force`.
pub async fn handle_source(service: &WingetService, cmd: &SourceCommand) -> bool {
    let result = match cmd {
        SourceCommand::List { json } => {
            let sources = service.list_sources().await;
            if *json {
                println!("{}", to_json(&sources));
            } else if sources.is_empty() {
                println!("No sources found.");
            } else {
                print!("{}", sources_table(&sources));
            }
            return true;
        }
        SourceCommand::Add {
            name,
            url,
            source_type,
        } => service.add_source(name, url, source_type.as_deref()).await,
        SourceCommand::Remove { name, force } => {
            if !force && name.trim().eq_ignore_ascii_case(DEFAULT_SOURCE_NAME) {
                OperationResult::failure(format!(
                    "Refusing to remove the default source '{DEFAULT_SOURCE_NAME}' (use --force)"
                ))
            } else {
                service.remove_source(name).await
            }
        }
        SourceCommand::Update { name } => service.update_source(name).await,
        SourceCommand::Reset { name } => service.reset_source(name).await,
        SourceCommand::Edit {
            old_name,
            name,
            url,
            source_type,
        } => {
            service
                .edit_source(old_name, name, url, source_type.as_deref())
                .await
        }
    };
    tracing::info!(success = result.success, "source command finished");
    println!("{}", result_line(&result));
    if !result.success && !result.output.trim().is_empty() {
        eprintln!("{}", result.output.trim_end());
    }
    result.success
}
