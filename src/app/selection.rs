//! Multi-package selection ("marks").
//!
//! Marks are stored by package name, never by list index, so they survive the
//! list being re-ranked, refreshed, or replaced by another browse mode.

use std::collections::BTreeSet;

/// Number of marked names the selection panel shows and can navigate.
pub const PANEL_ROWS: usize = 10;

/// The set of marked package names, kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    names: BTreeSet<String>,
}

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the name was not marked before.
    pub fn mark(&mut self, name: &str) -> bool {
        self.names.insert(name.to_string())
    }

    /// Returns `true` if the name was marked before.
    pub fn unmark(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }

    /// Flips the mark on `name`. Returns whether it is marked afterwards.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.unmark(name) {
            false
        } else {
            self.mark(name)
        }
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    #[must_use]
    pub fn is_marked(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Marked names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// The `index`-th name in sorted order.
    #[must_use]
    pub fn nth(&self, index: usize) -> Option<&str> {
        self.names.iter().nth(index).map(String::as_str)
    }
}

/// Cursor state of the selection panel overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionPanel {
    pub cursor: usize,
}

impl SelectionPanel {
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves down within the first [`PANEL_ROWS`] of `len` entries.
    pub fn move_down(&mut self, len: usize) {
        let max = len.min(PANEL_ROWS).saturating_sub(1);
        if self.cursor < max {
            self.cursor += 1;
        }
    }

    /// Pulls the cursor back inside the list after an entry was removed.
    pub fn clamp(&mut self, len: usize) {
        let max = len.min(PANEL_ROWS).saturating_sub(1);
        self.cursor = self.cursor.min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_then_unmark_restores_previous_set() {
        let mut set = SelectionSet::new();
        set.mark("vim");
        let before = set.clone();

        assert!(set.mark("emacs"));
        assert!(set.unmark("emacs"));
        assert_eq!(set, before);
    }

    #[test]
    fn toggle_on_marked_name_unmarks_it() {
        let mut set = SelectionSet::new();
        assert!(set.toggle("git"));
        assert!(set.is_marked("git"));
        assert!(!set.toggle("git"));
        assert!(set.is_empty());
    }

    #[test]
    fn names_are_sorted() {
        let mut set = SelectionSet::new();
        for name in ["zsh", "bash", "fish"] {
            set.mark(name);
        }
        assert_eq!(set.names(), vec!["bash", "fish", "zsh"]);
        assert_eq!(set.nth(1), Some("fish"));
    }

    #[test]
    fn panel_cursor_stays_within_visible_rows() {
        let mut panel = SelectionPanel::default();
        for _ in 0..20 {
            panel.move_down(15);
        }
        assert_eq!(panel.cursor, PANEL_ROWS - 1);

        panel.clamp(3);
        assert_eq!(panel.cursor, 2);

        panel.clamp(0);
        assert_eq!(panel.cursor, 0);
        panel.move_up();
        assert_eq!(panel.cursor, 0);
    }
}
