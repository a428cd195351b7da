//! Source table printed by `winget source list`.

use super::table::{Row, TableShape, scan};
use crate::state::PackageSource;

// Arguments are URLs, so `/` must not mark a line as progress output.
const SHAPE: TableShape = TableShape {
    mandatory: &["name", "argument"],
    columns: &["name", "argument", "type", "explicit", "data"],
    skip_progress: false,
};

/// What: Parse `winget source list` output into source records.
///
/// Inputs:
/// - `text`: Raw winget output
///
/// Output:
/// - Sources in output order; rows without a name are dropped.
///
/// Details:
/// - A trailing `…` (column truncation) is removed from the argument.
/// - `true`/`false` cells set the explicit flag.
#[must_use]
pub fn parse_sources(text: &str) -> Vec<PackageSource> {
    scan(text, &SHAPE).iter().filter_map(from_row).collect()
}

fn from_row(row: &Row) -> Option<PackageSource> {
    let (name, argument, source_type, data, explicit) = match row {
        Row::Cells(cells) => (
            cells.get("name")?.to_string(),
            cells.get("argument").unwrap_or_default().to_string(),
            cells.get("type").unwrap_or_default().to_string(),
            cells.get("data").unwrap_or_default().to_string(),
            cells.get("explicit").and_then(parse_flag).unwrap_or(false),
        ),
        Row::Tokens(tokens) => {
            let mut explicit = false;
            let mut positional = Vec::with_capacity(4);
            for token in tokens {
                match parse_flag(token) {
                    Some(flag) if !positional.is_empty() => explicit = flag,
                    _ => positional.push(token.as_str()),
                }
            }
            let at = |i: usize| positional.get(i).copied().unwrap_or_default().to_string();
            (at(0), at(1), at(2), at(3), explicit)
        }
    };
    if name.is_empty() {
        return None;
    }
    let argument = argument.trim_end_matches('…').trim_end();
    let mut source = PackageSource::new(&name, argument, &source_type, &data);
    source.explicit = explicit;
    Some(source)
}

fn parse_flag(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
