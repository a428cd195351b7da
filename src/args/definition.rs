//! Command-line argument definition and processing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;
use crate::service::WingetService;
use crate::state::SearchFilterType;

/// wingetctl - list, search, install and manage sources with winget
#[derive(Parser, Debug)]
#[command(name = "wingetctl")]
#[command(version)]
#[command(about = "List, search, install and manage package sources with winget", long_about = None)]
pub struct Args {
    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the winget executable (overrides settings.conf and auto-detection)
    #[arg(long, global = true)]
    pub winget: Option<PathBuf>,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List installed packages
    List {
        /// Only packages with a newer version available
        #[arg(long)]
        upgradable: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Search configured sources
    Search {
        /// Search text
        query: String,
        /// Field(s) the local filter inspects (name, id, both)
        #[arg(long, default_value = "both")]
        filter: SearchFilterType,
        /// Require the whole field to equal the query
        #[arg(long)]
        exact: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Install packages by id
    Install(PackageArgs),
    /// Upgrade packages by id
    Update(PackageArgs),
    /// Uninstall packages by id
    Uninstall(PackageArgs),
    /// Manage package sources
    #[command(subcommand)]
    Source(SourceCommand),
    /// Check whether winget is available
    Status,
}

/// Arguments shared by install, update and uninstall.
#[derive(clap::Args, Debug)]
pub struct PackageArgs {
    /// Package ids (space- or comma-separated)
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,
    /// Run without installer UI
    #[arg(long)]
    pub silent: bool,
    /// Show installer UI even when settings.conf enables silent mode
    #[arg(long, conflicts_with = "silent")]
    pub interactive: bool,
}

/// `source` subcommands.
#[derive(Subcommand, Debug)]
pub enum SourceCommand {
    /// List configured sources
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add a source and refresh it
    Add {
        /// Source name
        name: String,
        /// Source URL or argument
        url: String,
        /// Source type, e.g. Microsoft.Rest
        #[arg(long = "type")]
        source_type: Option<String>,
    },
    /// Remove a source
    Remove {
        /// Source name
        name: String,
        /// Allow removing the built-in winget source
        #[arg(long)]
        force: bool,
    },
    /// Refresh a source's index
    Update {
        /// Source name
        name: String,
    },
    /// Reset a source to its defaults
    Reset {
        /// Source name
        name: String,
    },
    /// Replace a source definition (remove, then add)
    Edit {
        /// Existing source name
        old_name: String,
        /// New source name
        name: String,
        /// New source URL or argument
        url: String,
        /// New source type
        #[arg(long = "type")]
        source_type: Option<String>,
    },
}

/// What: Run the requested subcommand.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
/// - `settings`: Loaded settings.conf values.
///
/// Output:
/// - `true` when every requested operation succeeded.
///
/// Details:
/// - `--winget` overrides `winget_path` from settings.
pub async fn process_args(args: &Args, settings: &Settings) -> bool {
    use crate::args::{list, packages, search, sources, status};

    let mut config = settings.service_config();
    if let Some(path) = &args.winget {
        config.winget_path = Some(path.clone());
    }
    let service = WingetService::new(config);

    match &args.command {
        Command::List { upgradable, json } => list::handle_list(&service, *upgradable, *json).await,
        Command::Search {
            query,
            filter,
            exact,
            json,
        } => search::handle_search(&service, query, *filter, *exact, *json).await,
        Command::Install(p) => {
            packages::handle_packages(&service, packages::PackageAction::Install, p, settings).await
        }
        Command::Update(p) => {
            packages::handle_packages(&service, packages::PackageAction::Update, p, settings).await
        }
        Command::Uninstall(p) => {
            packages::handle_packages(&service, packages::PackageAction::Uninstall, p, settings)
                .await
        }
        Command::Source(cmd) => sources::handle_source(&service, cmd).await,
        Command::Status => status::handle_status(&service, settings.probe_timeout()).await,
    }
}
