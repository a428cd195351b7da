//! Subprocess execution with captured output and a bounded wait.
//!
//! Every winget invocation goes through [`ProcessRunner::run`]. It never
//! turns a launch failure into empty text: callers get a [`RunError`] and
//! decide themselves how to surface it.

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

/// Interval between exit polls while a deadline is active.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Text captured from a finished process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Stdout, followed by stderr on a new line when stderr was non-empty.
    pub text: String,
    /// Exit code, if the process exited normally.
    pub exit_code: Option<i32>,
}

/// Reasons the tool could not be invoked at all.
#[derive(Debug)]
pub enum RunError {
    /// The executable could not be started.
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying OS error.
        source: std::io::Error,
    },
    /// Waiting for or talking to the child failed.
    Io {
        /// Program being run.
        program: String,
        /// Underlying OS error.
        source: std::io::Error,
    },
    /// The process outlived its deadline and was killed.
    TimedOut {
        /// Program being run.
        program: String,
        /// Deadline that elapsed.
        after: Duration,
    },
    /// The blocking worker running the invocation died.
    Worker(String),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn { program, source } => write!(f, "failed to start `{program}`: {source}"),
            Self::Io { program, source } => write!(f, "error while running `{program}`: {source}"),
            Self::TimedOut { program, after } => {
                write!(f, "`{program}` did not finish within {}s", after.as_secs())
            }
            Self::Worker(msg) => write!(f, "worker task failed: {msg}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } | Self::Io { source, .. } => Some(source),
            Self::TimedOut { .. } | Self::Worker(_) => None,
        }
    }
}

/// Runs one executable non-interactively and captures its output.
#[derive(Clone, Debug)]
pub struct ProcessRunner {
    /// Executable to launch.
    program: PathBuf,
    /// Upper bound on the wait; `None` waits until exit.
    timeout: Option<Duration>,
}

impl ProcessRunner {
    /// Runner for `program` without a deadline.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// Replace the wait deadline.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Executable this runner launches.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// What: Run the program with `args` and return its combined output.
    ///
    /// Inputs:
    /// - `args`: Argument vector passed verbatim (no shell involved)
    ///
    /// Output:
    /// - `Ok(CommandOutput)` once the process exits, whatever its exit code.
    ///
    /// # Errors
    /// - `RunError::Spawn` when the executable cannot be started
    /// - `RunError::Io` when waiting on the child fails
    /// - `RunError::TimedOut` when the deadline elapses; the child is killed
    ///
    /// Details:
    /// - stdin is closed, no console window is opened on Windows.
    /// - stdout and stderr are drained on their own threads so a chatty
    ///   process cannot block on a full pipe while we wait.
    pub fn run(&self, args: &[String]) -> Result<CommandOutput, RunError> {
        let program_label = self.program.display().to_string();
        debug!(program = %program_label, args = ?args, timeout = ?self.timeout, "running command");

        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        hide_console_window(&mut cmd);

        let mut child = cmd.spawn().map_err(|source| {
            warn!(program = %program_label, error = %source, "failed to spawn command");
            RunError::Spawn {
                program: program_label.clone(),
                source,
            }
        })?;
        let stdout_reader = spawn_reader(child.stdout.take());
        let stderr_reader = spawn_reader(child.stderr.take());

        let status = match self.timeout {
            None => child.wait().map_err(|source| RunError::Io {
                program: program_label.clone(),
                source,
            })?,
            Some(limit) => match wait_with_deadline(&mut child, limit) {
                Ok(Some(status)) => status,
                Ok(None) => {
                    warn!(program = %program_label, timeout_secs = limit.as_secs(), "command timed out; killing");
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(RunError::TimedOut {
                        program: program_label,
                        after: limit,
                    });
                }
                Err(source) => {
                    let _ = child.kill();
                    return Err(RunError::Io {
                        program: program_label,
                        source,
                    });
                }
            },
        };

        let stdout = join_reader(stdout_reader);
        let stderr = join_reader(stderr_reader);
        debug!(
            program = %program_label,
            status = ?status,
            stdout_len = stdout.len(),
            stderr_len = stderr.len(),
            "command finished"
        );
        Ok(CommandOutput {
            text: combine_output(&stdout, &stderr),
            exit_code: status.code(),
        })
    }
}

/// What: Check that `program` runs and exits successfully within `timeout`.
///
/// Inputs:
/// - `program`: Executable to probe
/// - `args`: Arguments (typically `--version`)
/// - `timeout`: Hard deadline
///
/// Output:
/// - `true` only for exit status 0 before the deadline; spawn errors and
///   timeouts yield `false` and a timed-out probe is killed.
pub fn probe(program: &Path, args: &[&str], timeout: Duration) -> bool {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    hide_console_window(&mut cmd);
    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => {
            debug!(program = %program.display(), error = %err, "probe could not start");
            return false;
        }
    };
    match wait_with_deadline(&mut child, timeout) {
        Ok(Some(status)) => status.success(),
        Ok(None) => {
            debug!(program = %program.display(), "probe timed out");
            let _ = child.kill();
            let _ = child.wait();
            false
        }
        Err(err) => {
            debug!(program = %program.display(), error = %err, "probe wait failed");
            false
        }
    }
}

/// What: Turn raw stdout/stderr bytes into the text handed to parsers.
///
/// Inputs:
/// - `stdout`, `stderr`: Raw captured bytes
///
/// Output:
/// - Cleaned stdout, plus a newline and cleaned stderr when stderr has content.
///
/// Details:
/// - Decoding is lossy; ANSI/VT sequences (progress bars, colours) are removed.
#[must_use]
pub fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
    let out = clean_text(stdout);
    let err = clean_text(stderr);
    if err.trim().is_empty() {
        out
    } else {
        format!("{out}\n{err}")
    }
}

/// What: Decode captured bytes into plain, `\n`-separated text.
///
/// Inputs:
/// - `bytes`: Raw process output
///
/// Output:
/// - Lossily decoded text without terminal escape sequences.
///
/// Details:
/// - `\r\n` becomes `\n` and a lone `\r` (spinner redraw) starts a new line,
///   so each redraw ends up on its own line instead of being glued to the next.
#[must_use]
pub fn clean_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .replace("\r\n", "\n")
        .split(['\r', '\n'])
        .map(strip_ansi_escapes::strip_str)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Poll `child` until it exits or `limit` elapses (`Ok(None)` on timeout).
fn wait_with_deadline(child: &mut Child, limit: Duration) -> std::io::Result<Option<ExitStatus>> {
    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if started.elapsed() >= limit {
            return Ok(None);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn join_reader(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

#[cfg(windows)]
fn hide_console_window(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    cmd.creation_flags(windows_sys::Win32::System::Threading::CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_console_window(_cmd: &mut Command) {}
