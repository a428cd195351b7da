//! Package tables printed by `winget list`, `winget search` and `winget upgrade`.

use std::str::FromStr;

use super::table::{Row, TableShape, scan};
use crate::state::{DEFAULT_SOURCE_NAME, Package, PackageStatus, UNKNOWN_VERSION};

const SHAPE: TableShape = TableShape {
    mandatory: &["name", "id"],
    columns: &["name", "id", "version", "available", "match", "source"],
    skip_progress: true,
};

/// Which listing the text came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackageTable {
    /// `winget list`
    Installed,
    /// `winget search`; the Match column is ignored.
    Search,
    /// `winget upgrade`
    Upgrades,
}

impl PackageTable {
    /// Status given to every record of this listing.
    #[must_use]
    pub const fn status(self) -> PackageStatus {
        match self {
            Self::Installed => PackageStatus::Installed,
            Self::Search => PackageStatus::Available,
            Self::Upgrades => PackageStatus::UpdateAvailable,
        }
    }

    /// Whether the Available column is read.
    #[must_use]
    pub const fn captures_available(self) -> bool {
        matches!(self, Self::Installed | Self::Upgrades)
    }
}

impl FromStr for PackageTable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "installed" | "list" => Ok(Self::Installed),
            "search" => Ok(Self::Search),
            "upgrades" | "upgrade" => Ok(Self::Upgrades),
            other => Err(format!("unknown package table `{other}`")),
        }
    }
}

/// What: Parse a package listing into records.
///
/// Inputs:
/// - `text`: Raw winget output
/// - `table`: Listing the output came from
///
/// Output:
/// - Packages in output order. Rows without a name or id, or with an id
///   containing whitespace (footer prose), are dropped.
///
/// Details:
/// - Missing version becomes `Unknown`, missing source `winget`.
/// - For upgrades an empty Available cell falls back to the current version.
#[must_use]
pub fn parse_packages(text: &str, table: PackageTable) -> Vec<Package> {
    scan(text, &SHAPE)
        .into_iter()
        .filter_map(|row| from_row(&row, table))
        .collect()
}

struct Fields<'a> {
    name: Option<&'a str>,
    id: Option<&'a str>,
    version: Option<&'a str>,
    available: Option<&'a str>,
    source: Option<&'a str>,
}

fn from_row(row: &Row, table: PackageTable) -> Option<Package> {
    let fields = match row {
        Row::Cells(cells) => Fields {
            name: cells.get("name"),
            id: cells.get("id"),
            version: cells.get("version"),
            available: cells.get("available"),
            source: cells.get("source"),
        },
        Row::Tokens(tokens) => {
            if tokens.len() < 2 {
                return None;
            }
            Fields {
                name: tokens.first().map(String::as_str),
                id: tokens.get(1).map(String::as_str),
                version: tokens.get(2).map(String::as_str),
                available: if tokens.len() >= 5 {
                    tokens.get(3).map(String::as_str)
                } else {
                    None
                },
                source: if tokens.len() >= 4 {
                    tokens.last().map(String::as_str)
                } else {
                    None
                },
            }
        }
    };

    let name = fields.name.filter(|n| !n.is_empty())?;
    let id = fields
        .id
        .filter(|i| !i.is_empty() && !i.contains(char::is_whitespace))?;
    let version = fields.version.unwrap_or(UNKNOWN_VERSION);
    let source = fields.source.unwrap_or(DEFAULT_SOURCE_NAME);

    let mut pkg = Package::new(id, name, version, source, table.status());
    if table.captures_available() {
        let available = fields.available.filter(|a| !a.is_empty());
        pkg = match (table, available) {
            (_, Some(a)) => pkg.with_available_version(a),
            (PackageTable::Upgrades, None) => pkg.with_available_version(version),
            _ => pkg,
        };
    }
    Some(pkg)
}
