//! winget executable resolution and command construction.
//!
//! Commands are built as argument vectors so they can be passed to the
//! runner without a shell, and rendered back to the familiar command line
//! (`install --id Foo --accept-package-agreements ...`) for logs and for
//! the scripts written by the elevation bridge.

use std::env;
use std::path::{Path, PathBuf};

/// Bare executable name used when no better location is known.
pub const WINGET_EXECUTABLE: &str = "winget";

/// Flags appended to install/upgrade/uninstall in silent mode.
const SILENT_FLAGS: [&str; 2] = ["--silent", "--disable-interactivity"];

/// What: Locate the winget executable.
///
/// Inputs:
/// - `override_path`: Path configured by the user, used as-is when present
///
/// Output:
/// - Path to launch.
///
/// Details:
/// - Without an override, checks the per-user install location
///   `%LOCALAPPDATA%\Microsoft\WindowsApps\winget.exe` first, then searches
///   `PATH`, and finally falls back to the bare name `winget`.
#[must_use]
pub fn resolve_winget_path(override_path: Option<&Path>) -> PathBuf {
    if let Some(path) = override_path {
        return path.to_path_buf();
    }
    let local_app_data = env::var_os("LOCALAPPDATA").map(PathBuf::from);
    resolve_from(local_app_data.as_deref())
}

/// Resolution with the per-user data directory passed in explicitly.
fn resolve_from(local_app_data: Option<&Path>) -> PathBuf {
    if let Some(base) = local_app_data {
        let candidate = base
            .join("Microsoft")
            .join("WindowsApps")
            .join("winget.exe");
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using per-user winget");
            return candidate;
        }
    }
    which::which(WINGET_EXECUTABLE).unwrap_or_else(|_| PathBuf::from(WINGET_EXECUTABLE))
}

/// One argument and how it is rendered on a command line.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Arg {
    /// Rendered verbatim.
    Plain(String),
    /// Rendered inside double quotes.
    Quoted(String),
}

impl Arg {
    fn value(&self) -> &str {
        match self {
            Self::Plain(v) | Self::Quoted(v) => v,
        }
    }
}

/// A winget invocation under construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WingetCommand {
    args: Vec<Arg>,
}

impl WingetCommand {
    /// Start a command from whitespace-separated subcommand words (`"source list"`).
    #[must_use]
    pub fn new(subcommand: &str) -> Self {
        Self {
            args: subcommand
                .split_whitespace()
                .map(|w| Arg::Plain(w.to_string()))
                .collect(),
        }
    }

    /// Append a bare argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(Arg::Plain(value.into()));
        self
    }

    /// Append an argument rendered in double quotes.
    #[must_use]
    pub fn quoted(mut self, value: impl Into<String>) -> Self {
        self.args.push(Arg::Quoted(value.into()));
        self
    }

    /// Append `flag` followed by a quoted `value`.
    #[must_use]
    pub fn quoted_option(self, flag: &str, value: impl Into<String>) -> Self {
        self.arg(flag).quoted(value)
    }

    /// Append the silent-mode flags when `silent` is set.
    #[must_use]
    pub fn silent(mut self, silent: bool) -> Self {
        if silent {
            self.args
                .extend(SILENT_FLAGS.iter().map(|f| Arg::Plain((*f).to_string())));
        }
        self
    }

    /// `list`
    #[must_use]
    pub fn list() -> Self {
        Self::new("list")
    }

    /// `upgrade` without arguments: lists upgrade candidates.
    #[must_use]
    pub fn upgrade_listing() -> Self {
        Self::new("upgrade")
    }

    /// `search "<query>"`
    #[must_use]
    pub fn search(query: &str) -> Self {
        Self::new("search").quoted(query)
    }

    /// `install --id <id> --accept-package-agreements --accept-source-agreements [silent]`
    #[must_use]
    pub fn install(id: &str, silent: bool) -> Self {
        Self::new("install")
            .arg("--id")
            .arg(id)
            .arg("--accept-package-agreements")
            .arg("--accept-source-agreements")
            .silent(silent)
    }

    /// `upgrade --id <id> --accept-package-agreements --accept-source-agreements [silent]`
    #[must_use]
    pub fn upgrade(id: &str, silent: bool) -> Self {
        Self::new("upgrade")
            .arg("--id")
            .arg(id)
            .arg("--accept-package-agreements")
            .arg("--accept-source-agreements")
            .silent(silent)
    }

    /// `uninstall --id <id> --accept-source-agreements [silent]`
    #[must_use]
    pub fn uninstall(id: &str, silent: bool) -> Self {
        Self::new("uninstall")
            .arg("--id")
            .arg(id)
            .arg("--accept-source-agreements")
            .silent(silent)
    }

    /// `source list`
    #[must_use]
    pub fn source_list() -> Self {
        Self::new("source list")
    }

    /// `source add --name "<n>" --arg "<url>" --accept-source-agreements [--type "<t>"]`
    #[must_use]
    pub fn source_add(name: &str, url: &str, source_type: Option<&str>) -> Self {
        let cmd = Self::new("source add")
            .quoted_option("--name", name)
            .quoted_option("--arg", url)
            .arg("--accept-source-agreements");
        match source_type.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => cmd.quoted_option("--type", t),
            None => cmd,
        }
    }

    /// `source remove --name "<n>"`
    #[must_use]
    pub fn source_remove(name: &str) -> Self {
        Self::new("source remove").quoted_option("--name", name)
    }

    /// `source update --name "<n>"`
    #[must_use]
    pub fn source_update(name: &str) -> Self {
        Self::new("source update").quoted_option("--name", name)
    }

    /// `source reset --name "<n>"`
    #[must_use]
    pub fn source_reset(name: &str) -> Self {
        Self::new("source reset").quoted_option("--name", name)
    }

    /// Argument vector handed to the process runner.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        self.args.iter().map(|a| a.value().to_string()).collect()
    }

    /// What: Render the command line as winget documents it.
    ///
    /// Output:
    /// - Space-joined arguments; quoted values wrapped in `"`, embedded
    ///   quotes escaped as `\"`.
    #[must_use]
    pub fn command_line(&self) -> String {
        self.args
            .iter()
            .map(|a| match a {
                Arg::Plain(v) => v.clone(),
                Arg::Quoted(v) => format!("\"{}\"", v.replace('"', "\\\"")),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Command line for a Windows batch file (`%` doubled so cmd keeps it literal).
    #[must_use]
    pub fn batch_line(&self) -> String {
        self.command_line().replace('%', "%%")
    }

    /// Command line for a POSIX shell script, every argument single-quoted.
    #[must_use]
    pub fn shell_line(&self) -> String {
        self.args
            .iter()
            .map(|a| super::shell_single_quote(a.value()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
