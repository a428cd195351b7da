//! Source listing and mutations through the elevation bridge.

use crate::fake_winget::FakeWinget;

#[tokio::test]
/// What: `list_sources` parses the source table and flags the default source.
///
/// Inputs:
/// - Fake printing msstore and winget rows
///
/// Output:
/// - Two sources; only `winget` is the default
async fn list_sources_parses_table() {
    let fake = FakeWinget::new();
    let sources = fake.service().list_sources().await;
    assert_eq!(sources.len(), 2, "{sources:?}");
    assert_eq!(sources[0].name, "msstore");
    assert!(!sources[0].is_default);
    assert_eq!(sources[1].argument, "https://cdn.winget.microsoft.com/cache");
    assert!(sources[1].is_default);
    assert!(!sources[1].explicit);
}

#[tokio::test]
/// What: Adding a source refreshes it afterwards.
///
/// Inputs:
/// - `add_source("corp", url, Some("Microsoft.Rest"))`
///
/// Output:
/// - Success; the fake saw `source add` then `source update`; no transient files remain
async fn add_source_then_refreshes() {
    let fake = FakeWinget::new();
    let r = fake
        .service()
        .add_source("corp", "https://pkgs.example.com/api", Some("Microsoft.Rest"))
        .await;
    assert!(r.success, "{r:?}");
    assert_eq!(r.message, "Source 'corp' added successfully");

    let calls = fake.calls();
    assert_eq!(calls.len(), 2, "{calls:?}");
    assert!(calls[0].starts_with("source add --name corp --arg https://pkgs.example.com/api"));
    assert!(calls[0].ends_with("--type Microsoft.Rest"));
    assert_eq!(calls[1], "source update --name corp");
    assert!(fake.leftovers().is_empty(), "{:?}", fake.leftovers());
}

#[tokio::test]
/// What: A failed add skips the refresh.
///
/// Inputs:
/// - Source name the fake rejects
///
/// Output:
/// - Failure with output and exit code kept; only one call
async fn failed_add_skips_refresh() {
    let fake = FakeWinget::new();
    let r = fake.service().add_source("badcorp", "https://x", None).await;
    assert!(!r.success);
    assert_eq!(r.error_message, "Failed to add source");
    assert!(r.output.contains("unexpected error"));
    assert_eq!(r.exit_code, Some(1));
    assert_eq!(fake.calls().len(), 1);
    assert!(fake.leftovers().is_empty());
}

#[tokio::test]
/// What: Remove, update and reset report their own verbs.
///
/// Inputs:
/// - Each mutation against an accepted name and a rejected name
///
/// Output:
/// - Success messages per verb; failures for the rejected name
async fn remove_update_reset() {
    let fake = FakeWinget::new();
    let svc = fake.service();
    assert_eq!(svc.remove_source("corp").await.message, "Source 'corp' removed successfully");
    assert_eq!(svc.update_source("corp").await.message, "Source 'corp' updated successfully");
    assert_eq!(svc.reset_source("corp").await.message, "Source 'corp' reset successfully");
    assert!(!svc.remove_source("bad").await.success);
    assert!(!svc.reset_source("bad-two").await.success);
    assert!(fake.leftovers().is_empty());
}

#[tokio::test]
/// What: Blank names and arguments fail before any invocation.
///
/// Inputs:
/// - Empty name, empty URL, blank names for the other mutations
///
/// Output:
/// - Validation messages and no recorded calls
async fn validation_precedes_invocation() {
    let fake = FakeWinget::new();
    let svc = fake.service();
    assert_eq!(svc.add_source(" ", "https://x", None).await.error_message, "Source name is required");
    assert_eq!(svc.add_source("corp", "", None).await.error_message, "Source URL/argument is required");
    assert_eq!(svc.remove_source("").await.error_message, "Source name is required");
    assert_eq!(svc.update_source("").await.error_message, "Source name is required");
    assert_eq!(svc.reset_source("\t").await.error_message, "Source name is required");
    assert!(fake.calls().is_empty());
}

#[tokio::test]
/// What: Editing replaces a source by removing and re-adding it.
///
/// Inputs:
/// - Edit `corp` to `corp2`; edit the default source; edit where removal fails
///
/// Output:
/// - Remove, add and update calls in order; the default source is refused;
///   a removal failure names the step
async fn edit_source_steps() {
    let fake = FakeWinget::new();
    let svc = fake.service();

    let r = svc.edit_source("corp", "corp2", "https://new", None).await;
    assert!(r.success, "{r:?}");
    assert_eq!(r.message, "Source 'corp' updated to 'corp2'");
    let calls = fake.calls();
    assert_eq!(calls[0], "source remove --name corp");
    assert!(calls[1].starts_with("source add --name corp2 --arg https://new"));
    assert_eq!(calls[2], "source update --name corp2");

    let refused = svc.edit_source("Winget", "x", "https://x", None).await;
    assert!(!refused.success);
    assert_eq!(refused.error_message, "The default source 'winget' cannot be edited");
    assert_eq!(fake.calls().len(), 3);

    let broken = svc.edit_source("bad", "good", "https://x", None).await;
    assert!(!broken.success);
    assert!(broken.error_message.starts_with("Edit failed while removing 'bad':"));
    assert!(fake.leftovers().is_empty());
}

#[tokio::test]
/// What: Values that would break out of a quoted script argument are refused.
///
/// Inputs:
/// - Names, URLs and types containing `"`, CR or LF for every source mutation
///
/// Output:
/// - Structured failure for each call and no winget invocation at all
async fn quote_and_line_breaks_are_refused() {
    let fake = FakeWinget::new();
    let svc = fake.service();
    let injected = "x\" & echo INJECTED & \"";
    let refused = "Source values must not contain double quotes or line breaks";

    for result in [
        svc.add_source(injected, "https://x", None).await,
        svc.add_source("corp", "https://x\r\necho INJECTED", None).await,
        svc.add_source("corp", "https://x", Some("Microsoft.Rest\" & echo")).await,
        svc.remove_source(injected).await,
        svc.update_source("corp\nsecond").await,
        svc.reset_source(injected).await,
        svc.edit_source("corp", injected, "https://x", None).await,
        svc.edit_source("corp", "corp2", "https://x\"", None).await,
    ] {
        assert!(!result.success);
        assert_eq!(result.error_message, refused);
    }
    assert!(fake.calls().is_empty(), "{:?}", fake.calls());
    assert!(fake.leftovers().is_empty());
}
