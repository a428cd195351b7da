//! Column-aligned table scanning shared by the package and source parsers.
//!
//! winget prints fixed-width tables: a header line naming the columns, a
//! dashed separator, then one row per record padded to the header's column
//! starts. Rows are cut at those starts (measured in terminal columns) when
//! they line up, and split on runs of whitespace when they do not.

use tracing::debug;
use unicode_width::UnicodeWidthChar;

use crate::util::process::clean_text;

/// Describes one table family.
#[derive(Clone, Copy, Debug)]
pub struct TableShape {
    /// Keywords that must all appear for a line to count as the header.
    pub mandatory: &'static [&'static str],
    /// Every column keyword, in the order the tool prints them.
    pub columns: &'static [&'static str],
    /// Drop spinner/progress lines (`/`, `\`, `|`, leading `-`).
    pub skip_progress: bool,
}

/// Header columns found in the current table.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Layout {
    /// `(keyword, start column)` in declaration order.
    columns: Vec<(&'static str, usize)>,
    /// Starts are strictly increasing, so rows can be cut at them.
    sliceable: bool,
}

/// Cells cut out of an aligned row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cells(Vec<(&'static str, String)>);

impl Cells {
    /// Trimmed text under `column`, `None` when the column is absent or the cell is blank.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == column)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }
}

/// One data line, either cut by column or split on whitespace runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Row {
    /// Row that lined up with the header.
    Cells(Cells),
    /// Whitespace-split tokens for positional assignment.
    Tokens(Vec<String>),
}

/// What: Scan winget output into data rows.
///
/// Inputs:
/// - `text`: Raw output (escape sequences and any newline convention allowed)
/// - `shape`: Header keywords and skipping rules
///
/// Output:
/// - Rows in input order; header, separator, blank and progress lines are
///   never returned.
///
/// Details:
/// - Lines before the first header are discarded. A later header line
///   starts a new table with its own column starts, but only when a
///   separator follows it, so a row naming `Name` and `Id` stays a row.
/// - Without any header, lines after the first separator are split on
///   whitespace; without a separator either, nothing is returned.
#[must_use]
pub fn scan(text: &str, shape: &TableShape) -> Vec<Row> {
    let cleaned = clean_text(text.as_bytes());
    let lines: Vec<&str> = cleaned.split('\n').collect();
    let has_header = (0..lines.len()).any(|i| header_at(&lines, i, shape, false).is_some());

    let mut layout: Option<Layout> = None;
    let mut past_separator = false;
    let mut rows = Vec::new();
    for (i, line) in lines.iter().copied().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(found) = header_at(&lines, i, shape, layout.is_some()) {
            debug!(columns = ?found.columns, sliceable = found.sliceable, "table header");
            layout = Some(found);
            continue;
        }
        if is_separator(line) {
            past_separator = true;
            continue;
        }
        if shape.skip_progress && is_progress(line) {
            continue;
        }
        match &layout {
            Some(current) => match current.slice(line) {
                Some(cells) => rows.push(Row::Cells(cells)),
                None => {
                    debug!(line, "row not aligned with header; splitting on whitespace");
                    rows.push(Row::Tokens(split_tokens(line)));
                }
            },
            None if !has_header && past_separator => rows.push(Row::Tokens(split_tokens(line))),
            None => {}
        }
    }
    rows
}

/// What: Split a line on runs of two or more whitespace characters.
///
/// Inputs:
/// - `line`: Data line
///
/// Output:
/// - Non-empty trimmed tokens; single spaces stay inside a token.
#[must_use]
pub fn split_tokens(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut pending_space: Option<char> = None;
    for ch in line.trim().chars() {
        if ch.is_whitespace() {
            if pending_space.is_some() {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            } else {
                pending_space = Some(ch);
            }
            continue;
        }
        if let Some(space) = pending_space.take()
            && !current.is_empty()
        {
            current.push(space);
        }
        current.push(ch);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Blank-free line made only of `-`, `=`, `─` and spaces.
fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| matches!(c, '-' | '=' | '─') || c.is_whitespace())
}

/// Spinner frames and progress bars left over from redraws.
fn is_progress(line: &str) -> bool {
    line.contains(['/', '\\', '|']) || line.trim_start().starts_with('-')
}

/// Words of `line` with their starting display column.
fn words(line: &str) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut col = 0;
    let mut current: Option<(usize, String)> = None;
    for ch in line.chars() {
        if ch.is_whitespace() {
            if let Some(word) = current.take() {
                out.push(word);
            }
        } else {
            current
                .get_or_insert_with(|| (col, String::new()))
                .1
                .push(ch);
        }
        col += ch.width().unwrap_or(0);
    }
    out.extend(current);
    out
}

/// What: Decide whether `lines[i]` opens a table.
///
/// Inputs:
/// - `lines`: Cleaned output lines
/// - `i`: Candidate index
/// - `established`: A header was already accepted
///
/// Output:
/// - The layout when the line passes [`detect_header`] and the next
///   non-blank line is a separator. Before any table, a line that also
///   names an optional column is accepted without a separator.
fn header_at(lines: &[&str], i: usize, shape: &TableShape, established: bool) -> Option<Layout> {
    let found = detect_header(lines[i], shape)?;
    let underlined = lines[i + 1..]
        .iter()
        .find(|l| !l.trim().is_empty())
        .is_some_and(|l| is_separator(l));
    let names_optional = found.columns.len() > shape.mandatory.len();
    (underlined || (!established && names_optional)).then_some(found)
}

/// What: Recognise a header line and record where each known column starts.
///
/// Output:
/// - `Some(Layout)` when every mandatory keyword is a whole word of `line`
///   (case-insensitive).
fn detect_header(line: &str, shape: &TableShape) -> Option<Layout> {
    let words = words(line);
    let find = |keyword: &str| {
        words
            .iter()
            .find(|(_, w)| w.eq_ignore_ascii_case(keyword))
            .map(|(col, _)| *col)
    };
    if !shape.mandatory.iter().all(|k| find(k).is_some()) {
        return None;
    }
    let columns: Vec<(&'static str, usize)> = shape
        .columns
        .iter()
        .filter_map(|k| find(k).map(|col| (*k, col)))
        .collect();
    let sliceable = columns.windows(2).all(|w| w[0].1 < w[1].1);
    Some(Layout { columns, sliceable })
}

impl Layout {
    /// What: Cut `line` at the header's column starts.
    ///
    /// Output:
    /// - `None` when the layout is not sliceable or a non-space character
    ///   sits right before (or straddles) a column start.
    fn slice(&self, line: &str) -> Option<Cells> {
        if !self.sliceable {
            return None;
        }
        let mut placed: Vec<(usize, usize, char)> = Vec::with_capacity(line.len());
        let mut col = 0;
        for ch in line.chars() {
            let width = ch.width().unwrap_or(0);
            placed.push((col, width, ch));
            col += width;
        }
        let misaligned = self.columns.iter().any(|&(_, start)| {
            start > 0
                && placed.iter().any(|&(c, w, ch)| {
                    !ch.is_whitespace() && c < start && c + w.max(1) > start - 1
                })
        });
        if misaligned {
            return None;
        }
        let cells = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, &(key, start))| {
                let end = self.columns.get(i + 1).map_or(usize::MAX, |next| next.1);
                let text: String = placed
                    .iter()
                    .filter(|&&(c, _, _)| c >= start && c < end)
                    .map(|&(_, _, ch)| ch)
                    .collect();
                (key, text.trim().to_string())
            })
            .collect();
        Some(Cells(cells))
    }
}
