//! Outcome classification from captured tool output.

use wingetctl::logic::{Operation, Outcome, classify, conclude};
use wingetctl::util::process::CommandOutput;

fn captured(text: &str, code: i32) -> CommandOutput {
    CommandOutput {
        text: text.to_string(),
        exit_code: Some(code),
    }
}

#[test]
/// What: The install success phrase wins regardless of exit code.
///
/// Inputs:
/// - Output containing `Successfully installed` with a non-zero exit code
///
/// Output:
/// - Success result with output and exit code attached
fn success_phrase_beats_exit_code() {
    let r = conclude(
        Operation::Install,
        "Git.Git",
        &captured("Installer hash verified\nSuccessfully installed\n", -1_978_335_189),
    );
    assert!(r.success);
    assert_eq!(r.exit_code, Some(-1_978_335_189));
    assert!(r.output.contains("hash verified"));
}

#[test]
/// What: Unrecognised output fails and keeps the raw text verbatim.
///
/// Inputs:
/// - Output with no known phrase, and empty output
///
/// Output:
/// - Failures whose `output` equals the captured text
fn unknown_output_fails_verbatim() {
    for text in ["\u{fffd}\u{fffd} garbage 0x8A15000F\r\n", ""] {
        let r = conclude(Operation::Uninstall, "X.Y", &captured(text, 0));
        assert!(!r.success);
        assert_eq!(r.output, text);
        assert_eq!(r.error_message, "Uninstall may have failed");
    }
}

#[test]
/// What: Phrases belong to their operation.
///
/// Inputs:
/// - Uninstall text classified as an install and vice versa; no-op phrases
///
/// Output:
/// - Cross-operation phrases fail; no-op phrases count as unchanged
fn phrases_are_operation_specific() {
    assert_eq!(classify(Operation::Install, "Successfully uninstalled"), Outcome::Failed);
    assert_eq!(classify(Operation::Uninstall, "Successfully installed"), Outcome::Failed);
    assert_eq!(classify(Operation::Update, "Successfully installed"), Outcome::Completed);
    assert_eq!(classify(Operation::Install, "package already installed"), Outcome::Unchanged);
    assert_eq!(classify(Operation::Update, "already the latest version"), Outcome::Unchanged);
    assert_eq!(classify(Operation::Uninstall, "already installed"), Outcome::Failed);
    assert_eq!(classify(Operation::SourceRemove, "Source removed"), Outcome::Completed);
}

#[test]
/// What: Elevation failures never count as success.
///
/// Inputs:
/// - Elevation failure text that happens to contain a source phrase
///
/// Output:
/// - Failure whose message is the elevation text
fn elevation_failure_is_failure() {
    let text = "Elevation failed: user declined; source was not added successfully";
    let r = conclude(Operation::SourceAdd, "corp", &captured(text, 1));
    assert!(!r.success);
    assert_eq!(r.error_message, text);
}
