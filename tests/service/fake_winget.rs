//! A shell script standing in for winget.
//!
//! The script logs every invocation's arguments and answers with canned
//! output shaped like the real tool's.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;
use wingetctl::util::elevate::Launcher;
use wingetctl::{ServiceConfig, WingetService};

const SCRIPT: &str = r#"#!/bin/sh
echo "$*" >> "$WINGETCTL_FAKE_LOG"
case "$1" in
--version)
  echo "v1.7.10861"
  ;;
list)
  printf '   - \r   \\ \r'
  cat <<'TABLE'
Name                 Id                   Version    Available  Source
----------------------------------------------------------------------
Git                  Git.Git              2.44.0     2.45.1     winget
Contoso Tool         Contoso.Tool         1.0
TABLE
  ;;
upgrade)
  if [ "$2" = "--id" ]; then
    case "$3" in
      Git.Git) echo "Successfully installed" ;;
      Contoso.Tool) echo "No newer package versions are available from the configured sources; already the latest." ;;
      *) echo "No installed package found matching input criteria."; exit 1 ;;
    esac
  else
    cat <<'TABLE'
Name      Id          Version   Available Source
------------------------------------------------
Git       Git.Git     2.44.0    2.45.1    winget
Thing     Some.Thing  3.1                 winget
2 upgrades available.
TABLE
  fi
  ;;
search)
  cat <<'TABLE'
Name               Id                         Version  Match          Source
-----------------------------------------------------------------------------
Visual Studio Code Microsoft.VisualStudioCode 1.89.1   Tag: vscode    winget
VSCodium           VSCodium.VSCodium          1.89.1   Tag: vscode    winget
Code Runner        Example.CodeRunner         0.3                     winget
TABLE
  ;;
install)
  case "$3" in
    Git.Git) printf 'Found Git [Git.Git]\r\n  ######  1.2 MB / 3.4 MB\r\nSuccessfully installed\r\n' ;;
    Contoso.Tool) echo "Found an existing package already installed. Trying to upgrade..." ;;
    *) echo "No package found matching input criteria." >&2; exit 20 ;;
  esac
  ;;
uninstall)
  case "$3" in
    Git.Git) echo "Successfully uninstalled" ;;
    *) echo "No installed package found matching input criteria."; exit 1 ;;
  esac
  ;;
source)
  case "$2" in
    list)
      cat <<'TABLE'
Name    Argument                                      Explicit
--------------------------------------------------------------
msstore https://storeedgefd.dsx.mp.microsoft.com/v9.0 false
winget  https://cdn.winget.microsoft.com/cache        false
TABLE
      ;;
    add|remove|update|reset)
      case "$4" in
        bad*) echo "An unexpected error occurred while executing the command"; exit 1 ;;
        *) echo "Source $4 $2 done successfully" ;;
      esac
      ;;
  esac
  ;;
esac
"#;

const HANGING: &str = r#"#!/bin/sh
echo "$*" >> "$WINGETCTL_FAKE_LOG"
sleep 5
"#;

/// What: Fake winget installation in a temporary directory.
///
/// Details:
/// - `temp` is the elevation bridge's transient directory, so tests can
///   check it is left empty.
pub struct FakeWinget {
    _dir: TempDir,
    pub program: PathBuf,
    pub log: PathBuf,
    pub temp: PathBuf,
}

impl FakeWinget {
    /// What: Fake answering like a healthy winget.
    ///
    /// Output:
    /// - Ready fixture; the script logs to `log`
    pub fn new() -> Self {
        Self::from_script(SCRIPT)
    }

    /// Fake that never answers within a short query timeout.
    pub fn hanging() -> Self {
        Self::from_script(HANGING)
    }

    fn from_script(script: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let program = dir.path().join("winget");
        let log = dir.path().join("calls.log");
        let temp = dir.path().join("transient");
        fs::create_dir_all(&temp).expect("mkdir transient");
        let body = script.replacen(
            "\"$WINGETCTL_FAKE_LOG\"",
            &format!("'{}'", log.display()),
            1,
        );
        fs::write(&program, body).expect("write script");
        let mut perms = fs::metadata(&program).expect("meta").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&program, perms).expect("chmod");
        Self {
            _dir: dir,
            program,
            log,
            temp,
        }
    }

    /// Service wired to this fake with the plain-shell launcher.
    pub fn service(&self) -> WingetService {
        self.service_with_timeout(Some(Duration::from_secs(30)))
    }

    /// Service wired to this fake with a custom query timeout.
    pub fn service_with_timeout(&self, timeout: Option<Duration>) -> WingetService {
        WingetService::new(ServiceConfig {
            winget_path: Some(self.program.clone()),
            query_timeout: timeout,
            launcher: Launcher::Inherit,
            temp_dir: Some(self.temp.clone()),
        })
    }

    /// Argument lines the fake received, in order.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Entries left in the transient directory.
    pub fn leftovers(&self) -> Vec<String> {
        list_dir(&self.temp)
    }
}

fn list_dir(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .expect("read_dir")
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect()
}
