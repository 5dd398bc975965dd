//! Query filter grammar.
//!
//! A query may start with a short prefix of single-letter tags followed by a
//! colon, e.g. `ae:fire` searches for "fire" in `extra` and the AUR. Two tag
//! alphabets exist: one for repositories while browsing the catalog, and one
//! for installed-package categories while removing packages.
//!
//! When the text before the first colon contains no known letter, the whole
//! input is treated as plain search text, so `foo:bar` stays a literal query.

use super::package::{PackageRecord, Source};
use std::collections::BTreeSet;

/// A repository tag usable in the catalog filter prefix.
///
/// Variant order is the display order used by [`RepoFilterSet::describe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RepoFilter {
    Core,
    Extra,
    Multilib,
    Aur,
}

impl RepoFilter {
    const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'c' => Some(Self::Core),
            'e' => Some(Self::Extra),
            'm' => Some(Self::Multilib),
            'a' => Some(Self::Aur),
            _ => None,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Extra => "extra",
            Self::Multilib => "multilib",
            Self::Aur => "aur",
        }
    }

    fn admits(self, source: &Source) -> bool {
        matches!(
            (self, source),
            (Self::Core, Source::Core)
                | (Self::Extra, Source::Extra)
                | (Self::Multilib, Source::Multilib)
                | (Self::Aur, Source::Aur)
        )
    }
}

/// Set of repository tags parsed from a query prefix. Empty means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoFilterSet(BTreeSet<RepoFilter>);

impl RepoFilterSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, filter: RepoFilter) -> bool {
        self.0.contains(&filter)
    }

    /// Whether a remote (AUR) search can contribute results under this filter.
    #[must_use]
    pub fn admits_aur(&self) -> bool {
        self.is_empty() || self.contains(RepoFilter::Aur)
    }

    /// Whether a record passes the filter. An empty set admits everything.
    #[must_use]
    pub fn admits(&self, record: &PackageRecord) -> bool {
        self.is_empty() || self.0.iter().any(|f| f.admits(&record.source))
    }

    /// Human readable form such as `extra+aur`.
    #[must_use]
    pub fn describe(&self) -> String {
        self.0.iter().map(|f| f.label()).collect::<Vec<_>>().join("+")
    }
}

impl FromIterator<RepoFilter> for RepoFilterSet {
    fn from_iter<I: IntoIterator<Item = RepoFilter>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Installed-package category usable in the removal filter prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InstalledFilter {
    Total,
    Explicit,
    Foreign,
    Orphan,
}

impl InstalledFilter {
    /// Maps a prefix letter (`t`, `e`, `f`, `o`) to its category.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            't' => Some(Self::Total),
            'e' => Some(Self::Explicit),
            'f' => Some(Self::Foreign),
            'o' => Some(Self::Orphan),
            _ => None,
        }
    }

    /// The prefix letter, used when another view prefills the query.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Total => 't',
            Self::Explicit => 'e',
            Self::Foreign => 'f',
            Self::Orphan => 'o',
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::Explicit => "explicit",
            Self::Foreign => "foreign",
            Self::Orphan => "orphan",
        }
    }

    fn admits(self, record: &PackageRecord) -> bool {
        match self {
            Self::Total => true,
            Self::Explicit => record.explicit,
            Self::Foreign => record.is_foreign(),
            Self::Orphan => record.orphan,
        }
    }
}

/// Set of installed-package categories. Categories combine with OR.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledFilterSet(BTreeSet<InstalledFilter>);

impl InstalledFilterSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn admits(&self, record: &PackageRecord) -> bool {
        self.is_empty() || self.0.iter().any(|f| f.admits(record))
    }

    #[must_use]
    pub fn describe(&self) -> String {
        self.0.iter().map(|f| f.label()).collect::<Vec<_>>().join("+")
    }
}

impl FromIterator<InstalledFilter> for InstalledFilterSet {
    fn from_iter<I: IntoIterator<Item = InstalledFilter>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Splits `input` into the tags named by its prefix and the remaining text.
fn split_prefix<T: Ord>(input: &str, lookup: fn(char) -> Option<T>) -> (BTreeSet<T>, String) {
    let input = input.trim();
    let Some((prefix, rest)) = input.split_once(':') else {
        return (BTreeSet::new(), input.to_string());
    };

    let tags: BTreeSet<T> = prefix.to_lowercase().chars().filter_map(lookup).collect();
    if tags.is_empty() {
        return (tags, input.to_string());
    }

    (tags, rest.trim().to_string())
}

/// Parses a catalog query into its repository filter and the leftover search text.
///
/// # Examples
///
/// ```
/// use zacman::domain::filter::{parse_repo_filter, RepoFilter};
///
/// let (filters, text) = parse_repo_filter("ae:fire");
/// assert!(filters.contains(RepoFilter::Aur));
/// assert!(filters.contains(RepoFilter::Extra));
/// assert_eq!(text, "fire");
///
/// let (filters, text) = parse_repo_filter("xyz:fire");
/// assert!(filters.is_empty());
/// assert_eq!(text, "xyz:fire");
/// ```
#[must_use]
pub fn parse_repo_filter(input: &str) -> (RepoFilterSet, String) {
    let (tags, rest) = split_prefix(input, RepoFilter::from_letter);
    (RepoFilterSet(tags), rest)
}

/// Parses a removal-view query into its category filter and leftover text.
#[must_use]
pub fn parse_installed_filter(input: &str) -> (InstalledFilterSet, String) {
    let (tags, rest) = split_prefix(input, InstalledFilter::from_letter);
    (InstalledFilterSet(tags), rest)
}
