//! Shared utilities for argument processing.

/// What: Determine the log level based on command-line arguments and environment variables.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `--log-level`.
/// - `WINGETCTL_TRACE=1` enables TRACE level for detailed parser decisions.
#[must_use]
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else if std::env::var("WINGETCTL_TRACE").ok().as_deref() == Some("1") {
        "trace".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Parse package ids from input, handling both comma-separated and space-separated formats.
///
/// Inputs:
/// - `ids`: Vector of id strings (may contain comma-separated values).
///
/// Output:
/// - Vector of individual ids, duplicates removed with first occurrence kept.
///
/// Details:
/// - Splits each input string by commas and trims whitespace.
/// - Filters out empty strings.
#[must_use]
pub fn parse_package_ids(ids: &[String]) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    for raw in ids {
        for id in raw.split(',') {
            let trimmed = id.trim();
            if !trimmed.is_empty() && !result.iter().any(|r| r == trimmed) {
                result.push(trimmed.to_string());
            }
        }
    }
    result
}

/// What: Decide whether a package operation runs silently.
///
/// Inputs:
/// - `silent`: `--silent` given
/// - `interactive`: `--interactive` given
/// - `default_silent`: `silent_by_default` from settings.conf
///
/// Output:
/// - `true` when `--silent` is given, or when settings ask for it and `--interactive` is absent.
#[must_use]
pub const fn effective_silent(silent: bool, interactive: bool, default_silent: bool) -> bool {
    silent || (default_silent && !interactive)
}
