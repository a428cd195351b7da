//! winget availability as an observable value.

use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use crate::state::ConnectionStatus;
use crate::util::process::probe;

/// Probes `winget --version` and publishes the result to subscribers.
#[derive(Debug)]
pub struct ConnectionMonitor {
    program: PathBuf,
    timeout: Duration,
    tx: watch::Sender<ConnectionStatus>,
}

impl ConnectionMonitor {
    /// Monitor for `program`, starting in [`ConnectionStatus::Checking`].
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        let (tx, _rx) = watch::channel(ConnectionStatus::Checking);
        Self {
            program: program.into(),
            timeout,
            tx,
        }
    }

    /// Receiver notified on every status change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ConnectionStatus> {
        self.tx.subscribe()
    }

    /// Last published status.
    #[must_use]
    pub fn current(&self) -> ConnectionStatus {
        *self.tx.borrow()
    }

    /// What: Probe winget and publish the outcome.
    ///
    /// Output:
    /// - `Connected` when `winget --version` exits 0 within the timeout,
    ///   `Disconnected` otherwise.
    ///
    /// Details:
    /// - Publishes `Checking` first; subscribers only see actual changes.
    pub async fn check(&self) -> ConnectionStatus {
        self.publish(ConnectionStatus::Checking);
        let program = self.program.clone();
        let timeout = self.timeout;
        let alive = tokio::task::spawn_blocking(move || probe(&program, &["--version"], timeout))
            .await
            .unwrap_or(false);
        let status = if alive {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        };
        self.publish(status);
        debug!(program = %self.program.display(), ?status, "connection checked");
        status
    }

    fn publish(&self, status: ConnectionStatus) {
        self.tx.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
    }
}
