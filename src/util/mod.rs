//! Process plumbing shared by the client: running winget, elevating it,
//! building its command lines, and small config-file helpers.

pub mod config;
pub mod elevate;
pub mod process;
pub mod winget;

/// What: Quote a string for safe use as one POSIX shell word.
///
/// Inputs:
/// - `s`: Raw string
///
/// Output:
/// - `s` wrapped in single quotes, embedded single quotes rewritten as `'"'"'`.
///
/// Details:
/// - Empty input becomes `''` so it still occupies an argument slot.
#[must_use]
pub fn shell_single_quote(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push_str("'\"'\"'");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}
