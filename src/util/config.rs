//! Line-level helpers for `settings.conf`.
//!
//! The file is a flat list of `key = value` lines. Comments start with `#`,
//! `//` or `;`, and may also trail a value.

/// What: Check if a line should be skipped (empty or comment).
///
/// Inputs:
/// - `line`: Raw line from the file
///
/// Output:
/// - `true` for blank lines and lines starting with `#`, `//`, or `;`
#[must_use]
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Cut a trailing `# ...` or `// ...` comment off a value.
///
/// Inputs:
/// - `s`: Value text after the `=`
///
/// Output:
/// - Trimmed value without the comment.
///
/// Details:
/// - A value that itself starts with `#` keeps that first `#`.
#[must_use]
pub fn strip_inline_comment(mut s: &str) -> &str {
    if let Some(i) = s.find("//") {
        s = &s[..i];
    }
    let hash = s
        .strip_prefix('#')
        .map_or_else(|| s.find('#'), |rest| rest.find('#').map(|j| j + 1));
    if let Some(i) = hash {
        s = &s[..i];
    }
    s.trim()
}

/// What: Parse a `key = value` line.
///
/// Inputs:
/// - `line`: Line containing `key=value`
///
/// Output:
/// - `Some((key, value))` with the key lowercased and `.`, `-` and spaces
///   folded to `_`, and the value stripped of any trailing comment.
/// - `None` for lines without `=` or with an empty key.
#[must_use]
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let (raw_key, raw_value) = line.trim().split_once('=')?;
    let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
    if key.is_empty() {
        return None;
    }
    Some((key, strip_inline_comment(raw_value.trim()).to_string()))
}

/// Interpret `true`/`1`/`yes`/`on` (any case) as true, everything else as false.
#[must_use]
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
