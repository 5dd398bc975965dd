//! The live query and its generation counter.

use crate::domain::{parse_repo_filter, RepoFilterSet};

/// The text in the search input, parsed, and tagged with a generation.
///
/// The generation increases by one every time the raw text changes to a
/// different value. Requests carry the generation they were issued under so a
/// late answer can be recognised as belonging to an older query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySession {
    raw: String,
    filters: RepoFilterSet,
    text: String,
    generation: u64,
}

impl QuerySession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the raw text. Returns `false` (and keeps the generation) when
    /// the text did not change.
    pub fn set_raw(&mut self, raw: impl Into<String>) -> bool {
        let raw = raw.into();
        if raw == self.raw {
            return false;
        }

        let (filters, text) = parse_repo_filter(&raw);
        self.raw = raw;
        self.filters = filters;
        self.text = text;
        self.generation += 1;

        tracing::trace!(raw = %self.raw, generation = self.generation, "query changed");
        true
    }

    pub fn push(&mut self, c: char) -> bool {
        let mut raw = self.raw.clone();
        raw.push(c);
        self.set_raw(raw)
    }

    pub fn pop(&mut self) -> bool {
        let mut raw = self.raw.clone();
        if raw.pop().is_none() {
            return false;
        }
        self.set_raw(raw)
    }

    pub fn clear(&mut self) -> bool {
        self.set_raw(String::new())
    }

    /// Text exactly as typed, including any filter prefix.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub const fn filters(&self) -> &RepoFilterSet {
        &self.filters
    }

    /// Search text left after removing the filter prefix.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}
