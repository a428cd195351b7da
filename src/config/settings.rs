use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, warn};

use super::paths::resolve_settings_config_path;
use crate::service::{DEFAULT_PROBE_TIMEOUT, DEFAULT_QUERY_TIMEOUT, ServiceConfig};
use crate::util::config::{parse_bool, parse_key_value, skip_comment_or_empty};
use crate::util::elevate::Launcher;

/// User settings read from `settings.conf`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Explicit winget executable.
    pub winget_path: Option<PathBuf>,
    /// Deadline for listings and searches; `0` disables it.
    pub query_timeout_secs: u64,
    /// Deadline for the availability probe.
    pub probe_timeout_secs: u64,
    /// Pass `--silent` to install/update/uninstall unless asked otherwise.
    pub silent_by_default: bool,
    /// How elevated source commands are launched.
    pub elevation: Launcher,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            winget_path: None,
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT.as_secs(),
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT.as_secs(),
            silent_by_default: false,
            elevation: Launcher::System,
        }
    }
}

impl Settings {
    /// Service configuration derived from these settings.
    #[must_use]
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            winget_path: self.winget_path.clone(),
            launcher: self.elevation,
            ..ServiceConfig::default()
        }
        .with_query_timeout_secs(self.query_timeout_secs)
    }

    /// Probe deadline as a duration.
    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

/// What: Load settings from `settings.conf` under HOME/XDG.
///
/// Output:
/// - Parsed settings; defaults when the file is missing or unreadable.
#[must_use]
pub fn load_settings() -> Settings {
    let Some(path) = resolve_settings_config_path() else {
        debug!("no settings.conf found; using defaults");
        return Settings::default();
    };
    match fs::read_to_string(&path) {
        Ok(content) => {
            debug!(path = %path.display(), "loading settings");
            parse_settings(&content)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not read settings.conf; using defaults");
            Settings::default()
        }
    }
}

/// What: Parse `settings.conf` content.
///
/// Inputs:
/// - `content`: File text
///
/// Output:
/// - Settings with every recognised key applied.
///
/// Details:
/// - Unknown keys are ignored and invalid values keep the default.
/// - A zero probe timeout is raised back to the default.
#[must_use]
pub fn parse_settings(content: &str) -> Settings {
    let mut settings = Settings::default();
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((key, val)) = parse_key_value(line) else {
            continue;
        };
        match key.as_str() {
            "winget_path" | "winget" => {
                settings.winget_path = (!val.is_empty()).then(|| PathBuf::from(&val));
            }
            "query_timeout_secs" | "query_timeout" => {
                if let Ok(v) = val.parse::<u64>() {
                    settings.query_timeout_secs = v;
                }
            }
            "probe_timeout_secs" | "probe_timeout" => {
                if let Ok(v) = val.parse::<u64>() {
                    settings.probe_timeout_secs = v;
                }
            }
            "silent_by_default" | "silent" => settings.silent_by_default = parse_bool(&val),
            "elevation" | "elevation_mode" => match val.parse::<Launcher>() {
                Ok(l) => settings.elevation = l,
                Err(err) => warn!(error = %err, "ignoring elevation setting"),
            },
            _ => {}
        }
    }
    if settings.probe_timeout_secs == 0 {
        settings.probe_timeout_secs = DEFAULT_PROBE_TIMEOUT.as_secs();
    }
    settings
}
