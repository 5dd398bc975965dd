//! Application state.
//!
//! [`AppState`] is the single owner of everything the browser knows: the
//! package pools, the live query, the merged list and cursor, marks, the open
//! modal, and the bookkeeping that decides which asynchronous answers are still
//! wanted. Only the dispatcher mutates it.
//!
//! Derived data (the ranked list, the installed-name set) is recomputed from
//! the pools whenever one of its inputs changes, never patched in place.

use super::actions::ActionKind;
use super::modal::{Confirmation, ModalState};
use super::modes::{BrowseMode, Focus};
use super::selection::{SelectionPanel, SelectionSet};
use crate::domain::{parse_installed_filter, DashboardStats, PackageRecord, PendingUpdate};
use crate::scheduler::{DetailScheduler, QuerySession, RemoteSearchGate};
use crate::search::{merge, merge_installed, RankedEntry, RankedList};
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Tunables that come from plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Shortest search text that produces results or a remote search.
    pub min_query_len: usize,
    /// Quiet window before the detail pane is fetched.
    pub detail_debounce: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_query_len: 2,
            detail_debounce: Duration::from_millis(150),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

/// One-line message under the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub level: StatusLevel,
}

/// Contents of the detail pane.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailPane {
    #[default]
    Empty,
    /// Waiting for the debounce window or the fetch itself.
    Loading(String),
    Loaded { name: String, text: String },
    Failed { name: String },
}

impl DetailPane {
    /// The package the pane is about, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Loading(name) | Self::Loaded { name, .. } | Self::Failed { name } => Some(name),
        }
    }
}

/// Listings currently outstanding, for the "loading" indicators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingLoads {
    pub index: bool,
    pub installed: bool,
    pub dashboard: bool,
    pub updates: bool,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub mode: BrowseMode,
    pub focus: Focus,

    /// Live query shared by the install and remove views.
    pub query: QuerySession,

    /// Sync database catalog.
    pub index: Vec<PackageRecord>,
    /// Installed packages with explicit/foreign/orphan flags.
    pub installed: Vec<PackageRecord>,
    installed_names: HashSet<String>,
    /// Remote search results and the staleness guard for them.
    pub remote: RemoteSearchGate,

    /// What the list currently shows.
    pub results: RankedList,
    pub cursor: usize,

    pub details: DetailScheduler,
    pub detail_pane: DetailPane,

    pub selection: SelectionSet,
    pub panel: SelectionPanel,
    pub modal: ModalState,

    /// The confirmed operation whose pane is still running.
    pub action_in_flight: Option<ActionKind>,

    pub dashboard: Option<DashboardStats>,
    pub updates: Vec<PendingUpdate>,
    pub status: Option<StatusLine>,

    /// Set when a listing failed. Automatic remote searches and detail fetches
    /// stay off until a manual refresh succeeds.
    pub refresh_failed: bool,
    pub loading: PendingLoads,
}

impl AppState {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            remote: RemoteSearchGate::new(settings.min_query_len),
            details: DetailScheduler::new(settings.detail_debounce),
            settings,
            mode: BrowseMode::Install,
            focus: Focus::SearchInput,
            query: QuerySession::new(),
            index: Vec::new(),
            installed: Vec::new(),
            installed_names: HashSet::new(),
            results: RankedList::default(),
            cursor: 0,
            detail_pane: DetailPane::Empty,
            selection: SelectionSet::new(),
            panel: SelectionPanel::default(),
            modal: ModalState::None,
            action_in_flight: None,
            dashboard: None,
            updates: Vec::new(),
            status: None,
            refresh_failed: false,
            loading: PendingLoads::default(),
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&RankedEntry> {
        self.results.get(self.cursor)
    }

    #[must_use]
    pub fn selected_name(&self) -> Option<&str> {
        self.selected().map(|e| e.record.name.as_str())
    }

    /// Whether a package of this name is installed, as far as any loaded list knows.
    #[must_use]
    pub fn is_installed(&self, name: &str) -> bool {
        self.installed_names.contains(name)
            || self.remote.pool().iter().any(|r| r.installed && r.name == name)
    }

    /// Rebuilds the installed-name lookup from the catalog and installed list.
    pub fn rebuild_installed_names(&mut self) {
        self.installed_names = self
            .index
            .iter()
            .filter(|r| r.installed)
            .chain(self.installed.iter())
            .map(|r| r.name.clone())
            .collect();
    }

    /// Whether the install view has enough input to show anything.
    #[must_use]
    pub fn query_is_searchable(&self) -> bool {
        !self.query.filters().is_empty() || self.remote.meets_min_len(self.query.text())
    }

    /// Recomputes the displayed list for the current mode.
    ///
    /// A cursor on the first row stays on the first row, so typing keeps the
    /// best match selected. Otherwise the cursor follows the previously
    /// selected name, or returns to the top if it disappeared.
    pub fn remerge(&mut self) {
        let previous = if self.cursor == 0 {
            None
        } else {
            self.selected_name().map(str::to_string)
        };

        self.results = match self.mode {
            BrowseMode::Install if self.query_is_searchable() => merge(
                self.index.iter().chain(self.remote.pool()),
                self.query.filters(),
                self.query.text(),
            ),
            BrowseMode::Remove => {
                let (filters, text) = parse_installed_filter(self.query.raw());
                merge_installed(&self.installed, &filters, &text)
            }
            BrowseMode::Install | BrowseMode::Dashboard | BrowseMode::Update => RankedList::default(),
        };

        self.cursor = previous
            .and_then(|name| self.results.position_of(&name))
            .unwrap_or(0);

        tracing::debug!(
            mode = ?self.mode,
            results = self.results.len(),
            cursor = self.cursor,
            "list merged"
        );
    }

    /// Moves the cursor by `delta` rows, clamped to the list.
    pub fn move_cursor(&mut self, delta: isize) {
        if self.results.is_empty() {
            self.cursor = 0;
            return;
        }
        let last = self.results.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    /// Points the detail pane at the selected row and schedules its fetch.
    ///
    /// Returns the wakeup delay the caller has to arrange, if any.
    pub fn sync_detail_target(&mut self, now: Instant) -> Option<Duration> {
        let selected = self.selected_name().map(str::to_string);
        if self.detail_pane.name() != selected.as_deref() {
            self.detail_pane = selected.clone().map_or(DetailPane::Empty, DetailPane::Loading);
            // the pane no longer holds text for this name, so it has to be fetched again
            self.details.invalidate();
        }

        if self.refresh_failed {
            return None;
        }
        self.details.select(selected.as_deref(), now)
    }

    /// Opens a confirmation dialog unless an operation is still running.
    pub fn open_confirmation(&mut self, confirmation: Confirmation) -> bool {
        if let Some(running) = self.action_in_flight {
            self.set_error(format!(
                "{} is still running; wait for it to finish",
                running.title()
            ));
            return false;
        }

        self.set_info(format!(
            "Confirm {}: [y] yes  [n] no",
            confirmation.kind.title().to_lowercase()
        ));
        self.modal = ModalState::Confirmation(confirmation);
        true
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.set_status(text, StatusLevel::Info);
    }

    pub fn set_success(&mut self, text: impl Into<String>) {
        self.set_status(text, StatusLevel::Success);
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.set_status(text, StatusLevel::Error);
    }

    fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusLine {
            text: text.into(),
            level,
        });
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
