//! View model types representing renderable UI state.
//!
//! View models are computed from the application state by
//! `AppState::compute_viewmodel` and consumed by the renderer. They carry only
//! display-ready data: truncated rows, highlight ranges, formatted sizes.

use crate::app::BrowseMode;
use crate::app::StatusLine;
use crate::domain::Source;

/// Everything one frame shows.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub tabs: Vec<TabInfo>,
    pub body: Body,
    pub status: Option<StatusLine>,
    pub footer: FooterInfo,
    /// Drawn over the body when present.
    pub selection_panel: Option<SelectionPanelInfo>,
    /// Drawn over everything when present.
    pub modal: Option<ModalInfo>,
}

/// One entry in the mode tab bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub mode: BrowseMode,
    pub label: String,
    pub hotkey: char,
    pub is_active: bool,
}

/// Main area content, per browse mode.
#[derive(Debug, Clone)]
pub enum Body {
    /// Install and remove views: search box, package list, detail pane.
    Browse(BrowseInfo),
    Dashboard(DashboardInfo),
    Updates(UpdatesInfo),
}

#[derive(Debug, Clone)]
pub struct BrowseInfo {
    pub search_bar: SearchBarInfo,
    /// Rows visible in the list window.
    pub items: Vec<DisplayItem>,
    /// Total rows before windowing, for the "n results" counter.
    pub total: usize,
    pub detail: DetailInfo,
    pub empty_state: Option<EmptyState>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    pub is_focused: bool,
    /// Active filter description, e.g. `extra+aur`.
    pub filter: Option<String>,
    pub placeholder: String,
}

/// One package row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub source: Source,
    pub name: String,
    pub version: String,
    pub is_selected: bool,
    pub is_marked: bool,
    pub is_installed: bool,
    /// Character ranges of `source/name` to highlight.
    pub highlight_ranges: Vec<(usize, usize)>,
}

impl DisplayItem {
    /// The text the highlight ranges index into.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}/{}", self.source, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailInfo {
    Hidden,
    Loading(String),
    Text(Vec<String>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardInfo {
    pub loading: bool,
    /// `(label, value, is_warning)` rows.
    pub rows: Vec<(String, String, bool)>,
    pub top_packages: Vec<(String, String)>,
    pub hints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatesInfo {
    pub loading: bool,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPanelInfo {
    pub names: Vec<String>,
    pub cursor: usize,
    /// Marked names beyond the visible rows.
    pub hidden: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalInfo {
    Confirmation {
        title: String,
        lines: Vec<String>,
        /// Lines above and below the visible window.
        above: usize,
        below: usize,
    },
    Error {
        title: String,
        message: String,
        detail: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}
