//! Core value types describing packages and package sources.

use chrono::{DateTime, Local};
use std::fmt;
use std::str::FromStr;

/// Name of the source that ships with winget and cannot be removed.
pub const DEFAULT_SOURCE_NAME: &str = "winget";

/// Placeholder used when a listing row carries no version text.
pub const UNKNOWN_VERSION: &str = "Unknown";

/// Type tag given to sources whose listing has no type column.
pub const UNKNOWN_SOURCE_TYPE: &str = "Unknown";

/// Lifecycle state of a package as seen by the client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    /// Nothing is known about the package.
    #[default]
    Unknown,
    /// Present on the machine.
    Installed,
    /// Offered by a source but not installed.
    Available,
    /// Installed with a newer version offered by its source.
    UpdateAvailable,
    /// Install in progress.
    Installing,
    /// Upgrade in progress.
    Updating,
    /// Uninstall in progress.
    Removing,
}

impl PackageStatus {
    /// Short label for list output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Installed => "installed",
            Self::Available => "available",
            Self::UpdateAvailable => "update available",
            Self::Installing => "installing",
            Self::Updating => "updating",
            Self::Removing => "removing",
        }
    }
}

/// A package row parsed from winget's tabular output.
///
/// Records are built fresh on every query and never mutated afterwards.
/// Equality compares content only: `last_seen` is an observation timestamp,
/// so two parses of the same text compare equal.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Package {
    /// Source-unique identifier (e.g. `Microsoft.VisualStudioCode`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Installed (or listed) version; `Unknown` when the row had none.
    pub version: String,
    /// Newer version offered by the source, for upgrade candidates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_version: Option<String>,
    /// Publisher; part of the record shape, never filled by listing output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Name of the source the row came from.
    pub source: String,
    /// Status assigned by the listing that produced the record.
    pub status: PackageStatus,
    /// When the record was observed.
    pub last_seen: DateTime<Local>,
}

impl Package {
    /// What: Build a package record observed now.
    ///
    /// Inputs:
    /// - `id`, `name`, `version`, `source`: Column text (already trimmed)
    /// - `status`: Status to tag the record with
    ///
    /// Output:
    /// - New `Package` without available version or publisher.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        source: impl Into<String>,
        status: PackageStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            available_version: None,
            publisher: None,
            source: source.into(),
            status,
            last_seen: Local::now(),
        }
    }

    /// Attach the version offered by the source.
    #[must_use]
    pub fn with_available_version(mut self, available: impl Into<String>) -> Self {
        self.available_version = Some(available.into());
        self
    }
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.version == other.version
            && self.available_version == other.available_version
            && self.publisher == other.publisher
            && self.source == other.source
            && self.status == other.status
    }
}

impl Eq for Package {}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - v{}", self.name, self.id, self.version)
    }
}

/// A package source registered with winget.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PackageSource {
    /// Source name; also its identity across listings.
    pub name: String,
    /// Connection argument (URL or path).
    pub argument: String,
    /// Free-form type tag; `Unknown` when the listing has no type column.
    #[serde(rename = "type")]
    pub source_type: String,
    /// Auxiliary data column.
    pub data: String,
    /// Whether the source must be targeted explicitly.
    pub explicit: bool,
    /// Whether this is the built-in winget source.
    pub is_default: bool,
}

impl PackageSource {
    /// What: Build a source record, deriving the default flag from the name.
    ///
    /// Inputs:
    /// - `name`: Source name
    /// - `argument`: URL or path
    /// - `source_type`: Type text; empty becomes `Unknown`
    /// - `data`: Auxiliary data
    ///
    /// Output:
    /// - New `PackageSource`; `is_default` is true exactly for `winget` (any case).
    #[must_use]
    pub fn new(name: &str, argument: &str, source_type: &str, data: &str) -> Self {
        let source_type = if source_type.trim().is_empty() {
            UNKNOWN_SOURCE_TYPE.to_string()
        } else {
            source_type.to_string()
        };
        Self {
            name: name.to_string(),
            argument: argument.to_string(),
            source_type,
            data: data.to_string(),
            explicit: false,
            is_default: name.eq_ignore_ascii_case(DEFAULT_SOURCE_NAME),
        }
    }
}

impl fmt::Display for PackageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.source_type)
    }
}

/// Which package field(s) a search filter inspects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum SearchFilterType {
    /// Display name only.
    Name,
    /// Identifier only.
    Id,
    /// Name or identifier.
    #[default]
    Both,
}

impl FromStr for SearchFilterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "id" | "identifier" => Ok(Self::Id),
            "both" | "any" => Ok(Self::Both),
            other => Err(format!("unknown filter type `{other}` (expected name, id or both)")),
        }
    }
}

/// Availability of the winget executable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum ConnectionStatus {
    /// A probe is running.
    #[default]
    Checking,
    /// `winget --version` answered in time.
    Connected,
    /// winget is missing, failed or timed out.
    Disconnected,
}

impl ConnectionStatus {
    /// Human-readable status line.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Connected => "Connected - winget available",
            Self::Disconnected => "Disconnected - check winget or internet",
            Self::Checking => "Checking connection...",
        }
    }

    /// Single-glyph indicator for compact status bars.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Connected => "●",
            Self::Disconnected => "○",
            Self::Checking => "⟳",
        }
    }
}
