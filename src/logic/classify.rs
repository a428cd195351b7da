//! Deciding whether a winget mutation worked from its printed output.
//!
//! winget's exit codes are not reliable across versions, so success is
//! recognised by phrases in the output. Each operation has its own phrase
//! table; matching is case-sensitive substring search.

use std::fmt;

use crate::state::OperationResult;
use crate::util::elevate::ELEVATION_FAILED_PREFIX;
use crate::util::process::CommandOutput;

/// A mutating winget operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `install`
    Install,
    /// `upgrade --id`
    Update,
    /// `uninstall`
    Uninstall,
    /// `source add`
    SourceAdd,
    /// `source remove`
    SourceRemove,
    /// `source update`
    SourceUpdate,
    /// `source reset`
    SourceReset,
}

/// How the output reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The change was made.
    Completed,
    /// Nothing to do: already installed or already up to date.
    Unchanged,
    /// No success phrase found, or elevation failed.
    Failed,
}

impl Outcome {
    /// Completed and unchanged both count as success.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Completed | Self::Unchanged)
    }
}

impl Operation {
    /// Phrases meaning the change was made.
    const fn completed_phrases(self) -> &'static [&'static str] {
        match self {
            Self::Install | Self::Update => &["Successfully installed"],
            Self::Uninstall => &["Successfully uninstalled"],
            Self::SourceAdd => &["successfully", "added"],
            Self::SourceRemove => &["successfully", "removed"],
            Self::SourceUpdate => &["successfully", "updated"],
            Self::SourceReset => &["successfully", "reset"],
        }
    }

    /// Phrases meaning there was nothing to change.
    const fn unchanged_phrases(self) -> &'static [&'static str] {
        match self {
            Self::Install => &["already installed"],
            Self::Update => &["already the latest"],
            _ => &[],
        }
    }

    /// Whether this operation targets a source rather than a package.
    #[must_use]
    pub const fn is_source(self) -> bool {
        matches!(
            self,
            Self::SourceAdd | Self::SourceRemove | Self::SourceUpdate | Self::SourceReset
        )
    }

    /// Past-tense verb used in success messages.
    const fn verb(self) -> &'static str {
        match self {
            Self::Install => "installed",
            Self::Update | Self::SourceUpdate => "updated",
            Self::Uninstall => "uninstalled",
            Self::SourceAdd => "added",
            Self::SourceRemove => "removed",
            Self::SourceReset => "reset",
        }
    }

    /// Prefix for invocation faults (`<prefix>: <fault>`).
    const fn fault_prefix(self) -> &'static str {
        match self {
            Self::Install => "Installation failed",
            Self::Update => "Update failed",
            Self::Uninstall => "Uninstall failed",
            Self::SourceAdd => "Failed to add source",
            Self::SourceRemove => "Failed to remove source",
            Self::SourceUpdate => "Failed to update source",
            Self::SourceReset => "Failed to reset source",
        }
    }

    /// Message for output without a success phrase.
    const fn unconfirmed_message(self) -> &'static str {
        match self {
            Self::Install => "Installation may have failed",
            Self::Update => "Update may have failed",
            Self::Uninstall => "Uninstall may have failed",
            Self::SourceAdd => "Failed to add source",
            Self::SourceRemove => "Failed to remove source",
            Self::SourceUpdate => "Failed to update source",
            Self::SourceReset => "Failed to reset source",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Install => "install",
            Self::Update => "update",
            Self::Uninstall => "uninstall",
            Self::SourceAdd => "source add",
            Self::SourceRemove => "source remove",
            Self::SourceUpdate => "source update",
            Self::SourceReset => "source reset",
        };
        f.write_str(name)
    }
}

/// What: Classify the output of `op`.
///
/// Inputs:
/// - `op`: Operation that produced the output
/// - `output`: Captured text
///
/// Output:
/// - `Failed` for elevation failures regardless of wording; otherwise the
///   first matching phrase table decides, `Failed` when none matches.
#[must_use]
pub fn classify(op: Operation, output: &str) -> Outcome {
    if output.starts_with(ELEVATION_FAILED_PREFIX) {
        return Outcome::Failed;
    }
    if op.completed_phrases().iter().any(|p| output.contains(p)) {
        Outcome::Completed
    } else if op.unchanged_phrases().iter().any(|p| output.contains(p)) {
        Outcome::Unchanged
    } else {
        Outcome::Failed
    }
}

/// What: Build the result for a finished invocation.
///
/// Inputs:
/// - `op`: Operation performed
/// - `target`: Package id or source name
/// - `output`: Captured output and exit code
///
/// Output:
/// - Success or failure result carrying the raw output and exit code.
///
/// Details:
/// - Elevation failures keep their `Elevation failed:` text as the error message.
#[must_use]
pub fn conclude(op: Operation, target: &str, output: &CommandOutput) -> OperationResult {
    let result = match classify(op, &output.text) {
        Outcome::Completed => OperationResult::success(success_message(op, target)),
        Outcome::Unchanged => OperationResult::success(unchanged_message(op, target)),
        Outcome::Failed if output.text.starts_with(ELEVATION_FAILED_PREFIX) => {
            OperationResult::failure(output.text.trim_end())
        }
        Outcome::Failed => OperationResult::failure(op.unconfirmed_message()),
    };
    result
        .with_output(output.text.clone())
        .with_exit_code(output.exit_code)
}

/// Failure result for an invocation that could not run at all.
#[must_use]
pub fn fault(op: Operation, err: &dyn std::error::Error) -> OperationResult {
    OperationResult::failure(format!("{}: {err}", op.fault_prefix()))
}

fn success_message(op: Operation, target: &str) -> String {
    if op.is_source() {
        format!("Source '{target}' {} successfully", op.verb())
    } else {
        format!("Package {target} {} successfully", op.verb())
    }
}

fn unchanged_message(op: Operation, target: &str) -> String {
    match op {
        Operation::Update => format!("Package {target} is already the latest version"),
        _ => format!("Package {target} is already installed"),
    }
}
