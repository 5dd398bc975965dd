//! Gatekeeping for remote (AUR) searches.
//!
//! A search is only sent once the query is long enough, the filter lets AUR
//! results through, and the text differs from the last text already sent. Each
//! answer is checked against the search that is currently authoritative before
//! it may touch the remote pool.

use super::session::QuerySession;
use crate::domain::PackageRecord;

/// The search most recently sent to the helper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSearch {
    pub query: String,
    pub generation: u64,
}

/// What happened to an arriving answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Answer to the last issued search; replaced the pool.
    Exact,
    /// Answer to a shorter query that the live text extends; filled an empty pool.
    PrefixFill,
    /// Stale or superseded; pool untouched.
    Discarded,
}

#[derive(Debug, Clone)]
pub struct RemoteSearchGate {
    min_len: usize,
    last_issued: Option<IssuedSearch>,
    pool: Vec<PackageRecord>,
    exact: bool,
}

impl RemoteSearchGate {
    #[must_use]
    pub const fn new(min_len: usize) -> Self {
        Self {
            min_len,
            last_issued: None,
            pool: Vec::new(),
            exact: false,
        }
    }

    /// Whether the live text is long enough to be searched or shown at all.
    #[must_use]
    pub fn meets_min_len(&self, text: &str) -> bool {
        text.chars().count() >= self.min_len
    }

    /// Decides whether the session warrants a new remote search.
    ///
    /// Returns the search to send and remembers it as the authoritative one.
    pub fn should_search(&mut self, session: &QuerySession) -> Option<IssuedSearch> {
        let text = session.text();
        if !self.meets_min_len(text) || !session.filters().admits_aur() {
            return None;
        }

        if self.last_issued.as_ref().is_some_and(|s| s.query == text) {
            return None;
        }

        let search = IssuedSearch {
            query: text.to_string(),
            generation: session.generation(),
        };
        self.last_issued = Some(search.clone());
        self.exact = false;
        Some(search)
    }

    /// Applies or discards an answer.
    ///
    /// The exact answer always replaces the pool, even when empty. A failed exact
    /// search counts as "no matches". An answer for a shorter query is only used
    /// to fill an empty pool while the exact one is still outstanding.
    pub fn accept(
        &mut self,
        query: &str,
        generation: u64,
        result: Result<Vec<PackageRecord>, String>,
        live_text: &str,
    ) -> Admission {
        let is_exact = self
            .last_issued
            .as_ref()
            .is_some_and(|s| s.query == query && s.generation == generation);

        if is_exact {
            self.pool = result.unwrap_or_else(|e| {
                tracing::warn!(query = %query, error = %e, "remote search failed");
                Vec::new()
            });
            self.exact = true;
            return Admission::Exact;
        }

        let extends = live_text.to_lowercase().starts_with(&query.to_lowercase());
        match result {
            Ok(records) if extends && self.pool.is_empty() && !self.exact => {
                self.pool = records;
                Admission::PrefixFill
            }
            _ => Admission::Discarded,
        }
    }

    /// Clears the pool and the one-entry cache, e.g. when the query gets too short.
    pub fn reset(&mut self) {
        self.pool.clear();
        self.last_issued = None;
        self.exact = false;
    }

    #[must_use]
    pub fn pool(&self) -> &[PackageRecord] {
        &self.pool
    }

    #[must_use]
    pub const fn last_issued(&self) -> Option<&IssuedSearch> {
        self.last_issued.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aur(name: &str) -> PackageRecord {
        PackageRecord::new("aur", name, "1")
    }

    fn session(raw: &str) -> QuerySession {
        let mut s = QuerySession::new();
        s.set_raw(raw);
        s
    }

    #[test]
    fn short_or_repo_only_queries_are_not_searched() {
        let mut gate = RemoteSearchGate::new(2);
        assert!(gate.should_search(&session("f")).is_none());
        assert!(gate.should_search(&session("ce:fire")).is_none());
        assert!(gate.should_search(&session("a:fire")).is_some());
    }

    #[test]
    fn identical_text_is_searched_once() {
        let mut gate = RemoteSearchGate::new(2);
        let mut s = session("fire");
        assert!(gate.should_search(&s).is_some());
        s.set_raw("ae:fire");
        assert!(gate.should_search(&s).is_none());
    }

    #[test]
    fn prefix_answer_fills_gap_then_exact_replaces_it() {
        let mut gate = RemoteSearchGate::new(2);
        let mut s = session("fire");
        let first = gate.should_search(&s).unwrap();
        s.set_raw("firefox");
        let second = gate.should_search(&s).unwrap();

        let admitted = gate.accept(&first.query, first.generation, Ok(vec![aur("firetools")]), s.text());
        assert_eq!(admitted, Admission::PrefixFill);
        assert_eq!(gate.pool().len(), 1);

        let admitted = gate.accept(&second.query, second.generation, Ok(vec![aur("firefox-nightly")]), s.text());
        assert_eq!(admitted, Admission::Exact);
        assert_eq!(gate.pool()[0].name, "firefox-nightly");
    }

    #[test]
    fn late_answer_never_overwrites_exact_result() {
        let mut gate = RemoteSearchGate::new(2);
        let mut s = session("fire");
        let first = gate.should_search(&s).unwrap();
        s.set_raw("firefox");
        let second = gate.should_search(&s).unwrap();

        gate.accept(&second.query, second.generation, Ok(vec![]), s.text());
        let admitted = gate.accept(&first.query, first.generation, Ok(vec![aur("firetools")]), s.text());
        assert_eq!(admitted, Admission::Discarded);
        assert!(gate.pool().is_empty());
    }

    #[test]
    fn unrelated_answer_is_discarded() {
        let mut gate = RemoteSearchGate::new(2);
        let s = session("vim");
        gate.should_search(&s);
        assert_eq!(gate.accept("emacs", 0, Ok(vec![aur("emacs-git")]), s.text()), Admission::Discarded);
    }

    #[test]
    fn failed_exact_search_empties_pool() {
        let mut gate = RemoteSearchGate::new(2);
        let mut s = session("fi");
        let first = gate.should_search(&s).unwrap();
        gate.accept(&first.query, first.generation, Ok(vec![aur("fish")]), s.text());

        s.set_raw("fis");
        let second = gate.should_search(&s).unwrap();
        let admitted = gate.accept(&second.query, second.generation, Err("network".into()), s.text());
        assert_eq!(admitted, Admission::Exact);
        assert!(gate.pool().is_empty());
    }
}
