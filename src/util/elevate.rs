//! Running winget with administrative rights.
//!
//! Source management changes machine-wide configuration. When the current
//! process is not elevated, the command is written to a transient script
//! whose output is redirected to a transient file; the script is launched
//! through a shell that asks the OS for elevation, and the output file is
//! read back once the shell exits. Both files are removed afterwards no
//! matter how the call ended.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::str::FromStr;

use tracing::{debug, info, warn};

use super::process::{CommandOutput, ProcessRunner, RunError, clean_text};
use super::winget::WingetCommand;

/// Prefix of every result text produced by a failed elevation attempt.
pub const ELEVATION_FAILED_PREFIX: &str = "Elevation failed:";

/// How the transient script is launched when elevation is needed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Launcher {
    /// Ask the OS for elevation (`runas` on Windows, `pkexec`/`sudo` elsewhere).
    #[default]
    System,
    /// Run the script with the plain shell in the current privilege context.
    Inherit,
}

impl FromStr for Launcher {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" | "runas" | "elevate" => Ok(Self::System),
            "inherit" | "none" | "shell" => Ok(Self::Inherit),
            other => Err(format!("unknown elevation mode `{other}`")),
        }
    }
}

/// What: Report whether this process already holds administrative rights.
///
/// Output:
/// - `true` when running as root (Unix) or as an elevated administrator (Windows).
#[cfg(unix)]
#[must_use]
pub fn is_elevated() -> bool {
    nix::unistd::geteuid().is_root()
}

/// What: Report whether this process already holds administrative rights.
///
/// Output:
/// - `true` when running as root (Unix) or as an elevated administrator (Windows).
#[cfg(windows)]
#[must_use]
pub fn is_elevated() -> bool {
    // SAFETY: IsUserAnAdmin takes no arguments and only inspects the process token.
    unsafe { windows_sys::Win32::UI::Shell::IsUserAnAdmin() != 0 }
}

#[cfg(not(any(unix, windows)))]
#[must_use]
pub const fn is_elevated() -> bool {
    false
}

/// Runs winget commands that require elevation.
#[derive(Clone, Debug)]
pub struct ElevationBridge {
    /// winget executable.
    program: PathBuf,
    /// Where transient script and output files are created.
    temp_dir: PathBuf,
    /// How the script is started.
    launcher: Launcher,
}

impl ElevationBridge {
    /// Bridge for `program` using the system temp directory and OS elevation.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            temp_dir: std::env::temp_dir(),
            launcher: Launcher::System,
        }
    }

    /// Use `dir` for transient files.
    #[must_use]
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    /// Replace the launcher.
    #[must_use]
    pub const fn with_launcher(mut self, launcher: Launcher) -> Self {
        self.launcher = launcher;
        self
    }

    /// What: Run `command` with administrative rights.
    ///
    /// Inputs:
    /// - `command`: winget command to execute
    ///
    /// Output:
    /// - Captured output. Elevation problems are reported in-band as text
    ///   starting with [`ELEVATION_FAILED_PREFIX`].
    ///
    /// # Errors
    /// - Only when the process is already elevated and the direct run fails
    ///   to start; that is an invocation fault like any other.
    pub fn run(&self, command: &WingetCommand) -> Result<CommandOutput, RunError> {
        if is_elevated() {
            debug!(command = %command.command_line(), "already elevated; running directly");
            return ProcessRunner::new(&self.program).run(&command.args());
        }
        Ok(self.run_via_script(command))
    }

    /// What: Run `command` through a transient script and an elevating shell.
    ///
    /// Inputs:
    /// - `command`: winget command to execute
    ///
    /// Output:
    /// - Contents of the transient output file, or an `Elevation failed: ...`
    ///   text when the script could not be written or launched, the prompt
    ///   was declined, or no output file appeared.
    ///
    /// Details:
    /// - Waits for the shell without a deadline.
    /// - Transient files are deleted when this function returns.
    pub fn run_via_script(&self, command: &WingetCommand) -> CommandOutput {
        let files = match TransientFiles::create(&self.temp_dir) {
            Ok(files) => files,
            Err(err) => {
                warn!(error = %err, dir = %self.temp_dir.display(), "could not stage transient files");
                return elevation_failure(&err.to_string(), None);
            }
        };
        info!(
            command = %command.command_line(),
            launcher = ?self.launcher,
            script = %files.script.display(),
            "running elevated winget command"
        );
        match self.launch(&files, command) {
            Ok(exit_code) => match fs::read(&files.output) {
                Ok(bytes) => CommandOutput {
                    text: clean_text(&bytes),
                    exit_code,
                },
                Err(err) => {
                    warn!(error = %err, path = %files.output.display(), "elevated output file missing");
                    elevation_failure("elevated output file not found", exit_code)
                }
            },
            Err(err) => {
                warn!(error = %err, "elevated launch failed");
                elevation_failure(&err.to_string(), None)
            }
        }
    }

    /// Write the script and start it with the configured launcher.
    fn launch(&self, files: &TransientFiles, command: &WingetCommand) -> io::Result<Option<i32>> {
        fs::write(&files.script, script_body(&self.program, command, &files.output))?;
        match self.launcher {
            Launcher::Inherit => run_plain_shell(&files.script),
            Launcher::System => run_elevated_shell(&files.script),
        }
    }
}

fn elevation_failure(reason: &str, exit_code: Option<i32>) -> CommandOutput {
    CommandOutput {
        text: format!("{ELEVATION_FAILED_PREFIX} {reason}"),
        exit_code,
    }
}

/// Uniquely named script/output pair inside a private directory, removed on drop.
///
/// The directory and the output file belong to the calling user, so an
/// elevated shell only writes into them and the caller can always delete
/// them afterwards.
struct TransientFiles {
    dir: PathBuf,
    script: PathBuf,
    output: PathBuf,
}

impl TransientFiles {
    /// What: Create the private directory and an empty output file.
    ///
    /// Inputs:
    /// - `base`: Existing temp directory
    ///
    /// Output:
    /// - Paths for `winget_cmd_<hex>.{bat|sh}` and `winget_out_<hex>.txt`.
    ///
    /// # Errors
    /// - `base` is missing or not writable.
    fn create(base: &Path) -> io::Result<Self> {
        let suffix = unique_suffix();
        let ext = if cfg!(windows) { "bat" } else { "sh" };
        let dir = base.join(format!("winget_{suffix}"));
        fs::create_dir(&dir)?;
        let files = Self {
            script: dir.join(format!("winget_cmd_{suffix}.{ext}")),
            output: dir.join(format!("winget_out_{suffix}.txt")),
            dir,
        };
        fs::File::create(&files.output)?;
        Ok(files)
    }
}

impl Drop for TransientFiles {
    fn drop(&mut self) {
        for path in [&self.script, &self.output] {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "could not remove transient file");
                }
            }
        }
        if let Err(err) = fs::remove_dir(&self.dir)
            && err.kind() != io::ErrorKind::NotFound
        {
            debug!(path = %self.dir.display(), error = %err, "could not remove transient directory");
        }
    }
}

fn unique_suffix() -> String {
    let n: u64 = rand::random();
    format!("{n:016x}{:x}", std::process::id())
}

#[cfg(windows)]
fn script_body(program: &Path, command: &WingetCommand, output: &Path) -> String {
    format!(
        "@echo off\r\n\"{}\" {} > \"{}\" 2>&1\r\n",
        program.display(),
        command.batch_line(),
        output.display()
    )
}

#[cfg(not(windows))]
fn script_body(program: &Path, command: &WingetCommand, output: &Path) -> String {
    use super::shell_single_quote;
    format!(
        "#!/bin/sh\n{} {} > {} 2>&1\n",
        shell_single_quote(&program.display().to_string()),
        command.shell_line(),
        shell_single_quote(&output.display().to_string())
    )
}

#[cfg(windows)]
fn run_plain_shell(script: &Path) -> io::Result<Option<i32>> {
    use std::os::windows::process::CommandExt;
    let status = Command::new("cmd.exe")
        .arg("/c")
        .arg(script)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .creation_flags(windows_sys::Win32::System::Threading::CREATE_NO_WINDOW)
        .status()?;
    Ok(status.code())
}

#[cfg(not(windows))]
fn run_plain_shell(script: &Path) -> io::Result<Option<i32>> {
    let status = Command::new("sh")
        .arg(script)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    Ok(status.code())
}

/// What: Start `cmd.exe /c "<script>"` with the `runas` verb and wait for it.
///
/// Output:
/// - Exit code of the elevated shell when available.
///
/// # Errors
/// - The OS error from `ShellExecuteExW`, e.g. when the consent prompt is declined.
#[cfg(windows)]
fn run_elevated_shell(script: &Path) -> io::Result<Option<i32>> {
    use std::ffi::{OsStr, OsString};
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Foundation::CloseHandle;
    use windows_sys::Win32::System::Threading::{GetExitCodeProcess, INFINITE, WaitForSingleObject};
    use windows_sys::Win32::UI::Shell::{SEE_MASK_NOCLOSEPROCESS, SHELLEXECUTEINFOW, ShellExecuteExW};
    use windows_sys::Win32::UI::WindowsAndMessaging::SW_HIDE;

    fn wide(s: &OsStr) -> Vec<u16> {
        s.encode_wide().chain(std::iter::once(0)).collect()
    }

    let verb = wide(OsStr::new("runas"));
    let file = wide(OsStr::new("cmd.exe"));
    let mut params = OsString::from("/c \"");
    params.push(script.as_os_str());
    params.push("\"");
    let params = wide(&params);

    // SAFETY: SHELLEXECUTEINFOW is plain data; all-zero means null pointers and no flags.
    let mut info: SHELLEXECUTEINFOW = unsafe { std::mem::zeroed() };
    info.cbSize = u32::try_from(std::mem::size_of::<SHELLEXECUTEINFOW>()).unwrap_or(u32::MAX);
    info.fMask = SEE_MASK_NOCLOSEPROCESS;
    info.lpVerb = verb.as_ptr();
    info.lpFile = file.as_ptr();
    info.lpParameters = params.as_ptr();
    info.nShow = SW_HIDE;

    // SAFETY: every pointer in `info` refers to a NUL-terminated buffer alive for the call.
    if unsafe { ShellExecuteExW(&mut info) } == 0 {
        return Err(io::Error::last_os_error());
    }
    if info.hProcess.is_null() {
        return Ok(None);
    }
    let mut code: u32 = 0;
    // SAFETY: hProcess is a valid handle owned by us until CloseHandle.
    let got_code = unsafe {
        WaitForSingleObject(info.hProcess, INFINITE);
        let got = GetExitCodeProcess(info.hProcess, &mut code);
        CloseHandle(info.hProcess);
        got != 0
    };
    Ok(got_code.then(|| i32::from_ne_bytes(code.to_ne_bytes())))
}

/// What: Run the script through `pkexec` (or `sudo` when pkexec is absent).
///
/// Output:
/// - Exit code of the elevated shell.
///
/// # Errors
/// - Spawn failures, and pkexec's "dismissed"/"not authorized" exits.
#[cfg(not(windows))]
fn run_elevated_shell(script: &Path) -> io::Result<Option<i32>> {
    let use_pkexec = which::which("pkexec").is_ok();
    let helper = if use_pkexec { "pkexec" } else { "sudo" };
    let status = Command::new(helper).arg("sh").arg(script).status()?;
    if use_pkexec && matches!(status.code(), Some(126 | 127)) {
        return Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "authorization was declined",
        ));
    }
    Ok(status.code())
}
