//! Merging the local catalog and remote results into one ranked list.
//!
//! The merge is a pure function of its inputs: the same pool (in any order),
//! filter and query always produce the same list. That lets the dispatcher
//! re-run it whenever either pool changes without tracking what was shown
//! before.

use super::highlight::highlight_spans;
use crate::domain::{InstalledFilterSet, PackageRecord, RepoFilterSet};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::cmp::{Ordering, Reverse};

/// A record in the displayed list together with its highlight spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub record: PackageRecord,
    /// Character ranges over [`PackageRecord::display_name`].
    pub highlights: Vec<(usize, usize)>,
}

/// Ordered result of a merge. Index 0 is the most relevant entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedList {
    entries: Vec<RankedEntry>,
}

impl RankedList {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&RankedEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedEntry> {
        self.entries.iter()
    }

    /// Position of the first entry with this package name.
    #[must_use]
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.record.name == name)
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.record.name.as_str()).collect()
    }
}

/// How a candidate matched the query; lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Tier {
    /// Query appears verbatim in the name, at this character offset.
    Substring(usize),
    /// Query letters appear in order; higher score is better.
    Subsequence(Reverse<i64>),
}

/// Merges a catalog pool under a repository filter and query.
///
/// 1. Records rejected by `filters` are dropped.
/// 2. An empty query returns the survivors in pool order, unranked.
/// 3. Otherwise names containing the query rank first (earlier position, then
///    shorter name), then subsequence matches (higher score, then shorter name).
///    Remaining ties are broken by name and source.
/// 4. If nothing ranks, a plain substring filter over `source/name` is used.
#[must_use]
pub fn merge<'a, I>(pool: I, filters: &RepoFilterSet, query: &str) -> RankedList
where
    I: IntoIterator<Item = &'a PackageRecord>,
{
    let candidates: Vec<&PackageRecord> = pool.into_iter().filter(|r| filters.admits(r)).collect();
    rank(&candidates, query)
}

/// Same as [`merge`] but filters by installed-package category.
#[must_use]
pub fn merge_installed(pool: &[PackageRecord], filters: &InstalledFilterSet, query: &str) -> RankedList {
    let candidates: Vec<&PackageRecord> = pool.iter().filter(|r| filters.admits(r)).collect();
    rank(&candidates, query)
}

fn rank(candidates: &[&PackageRecord], query: &str) -> RankedList {
    let _span = tracing::debug_span!(
        "rank",
        candidates = candidates.len(),
        query_len = query.len()
    )
    .entered();

    if query.is_empty() {
        return RankedList {
            entries: candidates
                .iter()
                .map(|r| RankedEntry {
                    record: (*r).clone(),
                    highlights: vec![],
                })
                .collect(),
        };
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let query_lower = query.to_lowercase();

    let mut scored: Vec<(Tier, &PackageRecord)> = candidates
        .iter()
        .filter_map(|record| {
            let name_lower = record.name.to_lowercase();
            if let Some(byte_pos) = name_lower.find(&query_lower) {
                let pos = name_lower[..byte_pos].chars().count();
                return Some((Tier::Substring(pos), *record));
            }
            matcher
                .fuzzy_match(&record.name, query)
                .map(|score| (Tier::Subsequence(Reverse(score)), *record))
        })
        .collect();

    scored.sort_by(|(ta, a), (tb, b)| compare(*ta, a, *tb, b));

    let records: Vec<&PackageRecord> = if scored.is_empty() {
        tracing::debug!("no ranked matches, falling back to substring filter");
        candidates
            .iter()
            .copied()
            .filter(|r| r.display_name().to_lowercase().contains(&query_lower))
            .collect()
    } else {
        scored.into_iter().map(|(_, r)| r).collect()
    };

    RankedList {
        entries: records
            .into_iter()
            .map(|record| RankedEntry {
                highlights: highlight_spans(&record.display_name(), query),
                record: record.clone(),
            })
            .collect(),
    }
}

fn compare(ta: Tier, a: &PackageRecord, tb: Tier, b: &PackageRecord) -> Ordering {
    ta.cmp(&tb)
        .then_with(|| a.name.chars().count().cmp(&b.name.chars().count()))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.source.cmp(&b.source))
}
