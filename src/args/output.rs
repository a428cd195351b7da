//! Terminal rendering of records and results.

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::state::{OperationResult, Package, PackageSource};

/// What: Lay out rows as a left-aligned table with a dashed rule under the header.
///
/// Inputs:
/// - `header`: Column titles
/// - `rows`: Cell text per row; each row has `header.len()` cells
///
/// Output:
/// - Rendered table, one line per row, columns separated by two spaces.
///
/// Details:
/// - Widths are measured in terminal columns so wide characters line up.
#[must_use]
pub fn render_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.width());
        }
    }
    let mut out = String::new();
    out.push_str(&pad_line(header.iter().copied(), &widths));
    out.push('\n');
    let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(total));
    out.push('\n');
    for row in rows {
        out.push_str(&pad_line(row.iter().map(String::as_str), &widths));
        out.push('\n');
    }
    out
}

fn pad_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, w)| format!("{cell}{}", " ".repeat(w.saturating_sub(cell.width()))))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Package table with an Available column when any record has one.
#[must_use]
pub fn packages_table(packages: &[Package]) -> String {
    let with_available = packages.iter().any(|p| p.available_version.is_some());
    let mut header = vec!["Name", "Id", "Version"];
    if with_available {
        header.push("Available");
    }
    header.push("Source");
    let rows: Vec<Vec<String>> = packages
        .iter()
        .map(|p| {
            let mut row = vec![p.name.clone(), p.id.clone(), p.version.clone()];
            if with_available {
                row.push(p.available_version.clone().unwrap_or_default());
            }
            row.push(p.source.clone());
            row
        })
        .collect();
    render_table(&header, &rows)
}

/// Source table; the default source is marked with `*`.
#[must_use]
pub fn sources_table(sources: &[PackageSource]) -> String {
    let rows: Vec<Vec<String>> = sources
        .iter()
        .map(|s| {
            let name = if s.is_default {
                format!("{} *", s.name)
            } else {
                s.name.clone()
            };
            vec![
                name,
                s.argument.clone(),
                s.source_type.clone(),
                s.explicit.to_string(),
            ]
        })
        .collect();
    render_table(&["Name", "Argument", "Type", "Explicit"], &rows)
}

/// One-line summary of a mutation result.
#[must_use]
pub fn result_line(result: &OperationResult) -> String {
    if result.success {
        format!("ok: {}", result.message)
    } else {
        format!("error: {}", result.error_message)
    }
}

/// What: Serialize records as pretty JSON.
///
/// Output:
/// - JSON text, or a JSON error object when serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|err| serde_json::json!({ "error": err.to_string() }).to_string())
}
