//! Command-line availability check.

use std::time::Duration;

use crate::service::WingetService;
use crate::state::ConnectionStatus;

/// What: Probe winget and print the connection status.
///
/// Inputs:
/// - `service`: winget facade (supplies the executable path)
/// - `probe_timeout`: Deadline for `winget --version`
///
/// Output:
/// - `true` when winget answered.
pub async fn handle_status(service: &WingetService, probe_timeout: Duration) -> bool {
    let monitor = service.connection_monitor(probe_timeout);
    let status = monitor.check().await;
    println!("{} {}", status.indicator(), status.message());
    println!("winget: {}", service.program().display());
    status == ConnectionStatus::Connected
}
