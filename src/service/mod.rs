//! Async facade over the winget executable.
//!
//! Every operation builds a [`WingetCommand`], runs it on tokio's blocking
//! pool and turns the text into records or an [`OperationResult`]. Reads
//! never fail outward: faults are logged and produce an empty list.
//! Mutations always produce a result value.
//!
//! [`OperationResult`]: crate::state::OperationResult

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::util::elevate::{ElevationBridge, Launcher};
use crate::util::process::{CommandOutput, ProcessRunner, RunError};
use crate::util::winget::{WingetCommand, resolve_winget_path};

pub mod packages;
pub mod sources;
pub mod status;

pub use status::ConnectionMonitor;

/// Deadline for listing and search queries unless configured otherwise.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(120);

/// Deadline for the `winget --version` availability probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Construction parameters for [`WingetService`].
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    /// Explicit winget executable; resolved automatically when `None`.
    pub winget_path: Option<PathBuf>,
    /// Deadline for read queries; `None` waits indefinitely.
    pub query_timeout: Option<Duration>,
    /// How elevated source commands are launched.
    pub launcher: Launcher,
    /// Directory for the elevation bridge's transient files; system temp when `None`.
    pub temp_dir: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            winget_path: None,
            query_timeout: Some(DEFAULT_QUERY_TIMEOUT),
            launcher: Launcher::System,
            temp_dir: None,
        }
    }
}

impl ServiceConfig {
    /// Set the query timeout in whole seconds; `0` disables it.
    #[must_use]
    pub const fn with_query_timeout_secs(mut self, secs: u64) -> Self {
        self.query_timeout = if secs == 0 {
            None
        } else {
            Some(Duration::from_secs(secs))
        };
        self
    }
}

/// Handle to winget; clones share the same configuration.
#[derive(Clone, Debug)]
pub struct WingetService {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    program: PathBuf,
    query_timeout: Option<Duration>,
    bridge: ElevationBridge,
}

impl WingetService {
    /// What: Build the facade, resolving the winget executable once.
    ///
    /// Inputs:
    /// - `config`: Executable override, query timeout, launcher and temp dir
    ///
    /// Output:
    /// - Ready-to-use service; nothing is spawned until an operation runs.
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        let program = resolve_winget_path(config.winget_path.as_deref());
        debug!(program = %program.display(), query_timeout = ?config.query_timeout, "winget service created");
        let mut bridge = ElevationBridge::new(&program).with_launcher(config.launcher);
        if let Some(dir) = config.temp_dir {
            bridge = bridge.with_temp_dir(dir);
        }
        Self {
            inner: Arc::new(Inner {
                program,
                query_timeout: config.query_timeout,
                bridge,
            }),
        }
    }

    /// Resolved winget executable.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.inner.program
    }

    /// Availability monitor probing the same executable.
    #[must_use]
    pub fn connection_monitor(&self, probe_timeout: Duration) -> ConnectionMonitor {
        ConnectionMonitor::new(self.program(), probe_timeout)
    }

    /// Run a read query under the query timeout.
    async fn query(&self, command: WingetCommand) -> Result<CommandOutput, RunError> {
        let runner = ProcessRunner::new(&self.inner.program).with_timeout(self.inner.query_timeout);
        blocking(move || runner.run(&command.args())).await
    }

    /// Run a package mutation without a deadline.
    async fn execute(&self, command: WingetCommand) -> Result<CommandOutput, RunError> {
        let runner = ProcessRunner::new(&self.inner.program);
        blocking(move || runner.run(&command.args())).await
    }

    /// Run a source mutation through the elevation bridge.
    async fn execute_elevated(&self, command: WingetCommand) -> Result<CommandOutput, RunError> {
        let bridge = self.inner.bridge.clone();
        blocking(move || bridge.run(&command)).await
    }
}

/// Move a blocking invocation onto tokio's blocking pool.
async fn blocking<T, F>(job: F) -> Result<T, RunError>
where
    F: FnOnce() -> Result<T, RunError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|err| RunError::Worker(err.to_string()))?
}
