//! User configuration for the `wingetctl` binary.
//!
//! The library core takes a [`ServiceConfig`](crate::service::ServiceConfig)
//! value; this module is how the binary builds one from `settings.conf`.

/// Path resolution for config and log directories.
mod paths;
/// `settings.conf` loading.
mod settings;

pub use paths::{config_dir, logs_dir};
pub use settings::{Settings, load_settings, parse_settings};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a shared mutex for tests that change HOME/XDG variables.
///
/// Output:
/// - Process-wide mutex guarding environment mutations.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
