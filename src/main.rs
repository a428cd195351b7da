//! wingetctl binary entrypoint: logging, settings, then the subcommand.

use std::fmt;
use std::process::ExitCode;

use clap::Parser;
use wingetctl::args::{Args, determine_log_level, process_args};
use wingetctl::config::{load_settings, logs_dir};

struct WingetctlTimer;

impl tracing_subscriber::fmt::time::FormatTime for WingetctlTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        // "YYYY-MM-DD-T HH:MM:SS"
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S");
        write!(w, "{ts}")
    }
}

/// What: Initialise tracing to `<config dir>/logs/wingetctl.log`, or stderr if that fails.
///
/// Inputs:
/// - `level`: Default filter when `RUST_LOG` is unset.
///
/// Output:
/// - The appender's worker guard; buffered lines are flushed when it drops.
fn init_logging(level: &str) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let mut log_path = logs_dir();
    log_path.push("wingetctl.log");
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(WingetctlTimer)
                .init();
            tracing::info!(path = %log_path.display(), "logging initialized");
            Some(guard)
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(WingetctlTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
            None
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let _log_guard = init_logging(&determine_log_level(&args));

    let settings = load_settings();
    tracing::info!(command = ?args.command, "wingetctl starting");
    let ok = process_args(&args, &settings).await;
    tracing::info!(success = ok, "wingetctl exited");
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
