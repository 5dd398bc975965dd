//! Package records as reported by pacman and the AUR helper.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Repository a package comes from.
///
/// The four well-known repositories get their own variants so filters can match
/// them without string comparisons. Any other repository name (custom or testing
/// repos) is kept verbatim in [`Source::Other`]. `Local` is used for installed
/// packages whose repository cannot be determined.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Source {
    Core,
    Extra,
    Multilib,
    Aur,
    Local,
    Other(String),
}

impl Source {
    /// Returns the repository name as pacman prints it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Core => "core",
            Self::Extra => "extra",
            Self::Multilib => "multilib",
            Self::Aur => "aur",
            Self::Local => "local",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for Source {
    fn from(value: &str) -> Self {
        match value {
            "core" => Self::Core,
            "extra" => Self::Extra,
            "multilib" => Self::Multilib,
            "aur" => Self::Aur,
            "local" => Self::Local,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Source {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Source> for String {
    fn from(value: Source) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single package known to the browser.
///
/// Records are immutable once produced by a parser; a refresh replaces the whole
/// list. Identity is the `(source, name)` pair, but lookups in the displayed list
/// go by name only since the same name never appears in two repositories that are
/// enabled at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub source: Source,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub installed: bool,
    /// Installed explicitly rather than as a dependency.
    #[serde(default)]
    pub explicit: bool,
    /// Installed as a dependency that nothing requires any more.
    #[serde(default)]
    pub orphan: bool,
}

impl PackageRecord {
    /// Creates a record with only the identifying fields set.
    #[must_use]
    pub fn new(source: impl Into<Source>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            name: name.into(),
            version: version.into(),
            description: String::new(),
            installed: false,
            explicit: false,
            orphan: false,
        }
    }

    /// The `source/name` string shown in lists and used for highlight spans.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}/{}", self.source, self.name)
    }

    /// Foreign packages are the ones that came from the AUR.
    #[must_use]
    pub fn is_foreign(&self) -> bool {
        self.source == Source::Aur
    }
}

/// An available upgrade reported by `-Qu`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingUpdate {
    pub name: String,
    /// Version transition as printed, e.g. `1.2-1 -> 1.3-1`.
    pub versions: String,
}
