//! View model computation.
//!
//! Turns the application state into a [`UIViewModel`] sized for the current
//! pane. All windowing (which list rows and dialog lines are visible) happens
//! here so the components only print what they are given.

use super::modal::{ModalState, CONFIRM_VISIBLE_ROWS};
use super::modes::{BrowseMode, Focus};
use super::selection::PANEL_ROWS;
use super::state::{AppState, DetailPane};
use crate::domain::{format_bytes, parse_installed_filter};
use crate::ui::viewmodel::{
    Body, BrowseInfo, DashboardInfo, DetailInfo, DisplayItem, EmptyState, FooterInfo, ModalInfo,
    SearchBarInfo, SelectionPanelInfo, TabInfo, UIViewModel, UpdatesInfo,
};

/// Rows taken by everything except the list: tabs, borders, search box,
/// status line and footer.
const CHROME_ROWS: usize = 9;

impl AppState {
    /// Computes the view model for a pane of `rows` x `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, _cols: usize) -> UIViewModel {
        let list_height = rows.saturating_sub(CHROME_ROWS).max(1);

        let body = match self.mode {
            BrowseMode::Install | BrowseMode::Remove => Body::Browse(self.browse_info(list_height)),
            BrowseMode::Dashboard => Body::Dashboard(self.dashboard_info()),
            BrowseMode::Update => Body::Updates(UpdatesInfo {
                loading: self.loading.updates,
                lines: self
                    .updates
                    .iter()
                    .map(|u| format!("{} {}", u.name, u.versions))
                    .collect(),
            }),
        };

        UIViewModel {
            tabs: BrowseMode::ALL
                .into_iter()
                .map(|mode| TabInfo {
                    mode,
                    label: mode.label().to_string(),
                    hotkey: mode.hotkey(),
                    is_active: mode == self.mode,
                })
                .collect(),
            body,
            status: self.status.clone(),
            footer: FooterInfo {
                keybindings: self.keybindings().to_string(),
            },
            selection_panel: (self.focus == Focus::SelectionPanel).then(|| self.selection_panel_info()),
            modal: self.modal_info(),
        }
    }

    fn browse_info(&self, height: usize) -> BrowseInfo {
        let start = if self.cursor >= height {
            self.cursor + 1 - height
        } else {
            0
        };

        let items = self
            .results
            .iter()
            .enumerate()
            .skip(start)
            .take(height)
            .map(|(index, entry)| DisplayItem {
                source: entry.record.source.clone(),
                name: entry.record.name.clone(),
                version: entry.record.version.clone(),
                is_selected: index == self.cursor,
                is_marked: self.selection.is_marked(&entry.record.name),
                is_installed: entry.record.installed || self.is_installed(&entry.record.name),
                highlight_ranges: entry.highlights.clone(),
            })
            .collect();

        let (filter, placeholder) = if self.mode == BrowseMode::Remove {
            let (filters, _) = parse_installed_filter(self.query.raw());
            (
                (!filters.is_empty()).then(|| filters.describe()),
                "Filter installed packages (t: e: f: o:)",
            )
        } else {
            let filters = self.query.filters();
            (
                (!filters.is_empty()).then(|| filters.describe()),
                "Search packages (c: e: m: a: to filter by repo)",
            )
        };

        BrowseInfo {
            search_bar: SearchBarInfo {
                query: self.query.raw().to_string(),
                is_focused: self.focus == Focus::SearchInput,
                filter,
                placeholder: placeholder.to_string(),
            },
            items,
            total: self.results.len(),
            detail: self.detail_info(),
            empty_state: self.empty_state(),
        }
    }

    fn detail_info(&self) -> DetailInfo {
        match &self.detail_pane {
            DetailPane::Empty => DetailInfo::Hidden,
            DetailPane::Loading(name) => DetailInfo::Loading(name.clone()),
            DetailPane::Loaded { text, .. } => DetailInfo::Text(text.lines().map(str::to_string).collect()),
            DetailPane::Failed { .. } => DetailInfo::Failed("Failed to load package info".to_string()),
        }
    }

    fn empty_state(&self) -> Option<EmptyState> {
        if !self.results.is_empty() {
            return None;
        }

        let (message, subtitle) = if self.refresh_failed {
            ("Package list unavailable".to_string(), "Press Ctrl+r to retry".to_string())
        } else {
            match self.mode {
                BrowseMode::Install if self.loading.index => {
                    ("Loading package database...".to_string(), String::new())
                }
                BrowseMode::Install if !self.query_is_searchable() => (
                    format!("Type at least {} characters to search", self.settings.min_query_len),
                    "Prefix with c: e: m: a: to filter by repository".to_string(),
                ),
                BrowseMode::Remove if self.loading.installed => {
                    ("Loading installed packages...".to_string(), String::new())
                }
                _ => ("No packages found".to_string(), "Try a different search".to_string()),
            }
        };

        Some(EmptyState { message, subtitle })
    }

    fn dashboard_info(&self) -> DashboardInfo {
        let Some(stats) = &self.dashboard else {
            return DashboardInfo {
                loading: self.loading.dashboard,
                rows: Vec::new(),
                top_packages: Vec::new(),
                hints: Vec::new(),
            };
        };

        let size = if stats.total_size.is_empty() {
            format_bytes(stats.total_size_bytes)
        } else {
            stats.total_size.clone()
        };

        let rows = vec![
            ("Total packages".to_string(), stats.total_packages.to_string(), false),
            ("Explicitly installed".to_string(), stats.explicit_packages.to_string(), false),
            ("Foreign (AUR)".to_string(), stats.foreign_packages.to_string(), false),
            ("Orphans".to_string(), stats.orphan_packages.to_string(), stats.orphan_packages > 0),
            ("Missing from AUR".to_string(), stats.missing_from_aur.to_string(), stats.missing_from_aur > 0),
            ("Installed size".to_string(), size, false),
            ("Package cache".to_string(), format_bytes(stats.cache_bytes()), false),
        ];

        let mut hints = vec![
            "[t] total  [e] explicit  [f] foreign  [o] orphans".to_string(),
            "[c] clean cache".to_string(),
        ];
        if stats.orphan_packages > 0 {
            hints.push("[R] remove orphans".to_string());
        }

        DashboardInfo {
            loading: self.loading.dashboard,
            rows,
            top_packages: stats
                .top_packages
                .iter()
                .map(|p| (p.name.clone(), p.size.clone()))
                .collect(),
            hints,
        }
    }

    fn selection_panel_info(&self) -> SelectionPanelInfo {
        let names: Vec<String> = self.selection.iter().take(PANEL_ROWS).map(str::to_string).collect();
        SelectionPanelInfo {
            hidden: self.selection.len().saturating_sub(names.len()),
            names,
            cursor: self.panel.cursor,
        }
    }

    fn modal_info(&self) -> Option<ModalInfo> {
        match &self.modal {
            ModalState::None => None,
            ModalState::Confirmation(dialog) => {
                let end = (dialog.scroll_offset + CONFIRM_VISIBLE_ROWS).min(dialog.lines.len());
                Some(ModalInfo::Confirmation {
                    title: dialog.kind.title().to_string(),
                    lines: dialog.lines[dialog.scroll_offset.min(end)..end].to_vec(),
                    above: dialog.scroll_offset,
                    below: dialog.lines.len() - end,
                })
            }
            ModalState::ErrorOverlay(overlay) => Some(ModalInfo::Error {
                title: overlay.title.clone(),
                message: overlay.message.clone(),
                detail: overlay.detail.clone(),
            }),
        }
    }

    fn keybindings(&self) -> &'static str {
        if self.modal.is_open() {
            return match self.modal {
                ModalState::ErrorOverlay(_) => "esc dismiss",
                _ => "y confirm  n cancel  j/k scroll",
            };
        }

        match (self.focus, self.mode) {
            (Focus::SelectionPanel, _) => "j/k move  tab unmark  enter apply  esc close",
            (Focus::SearchInput, BrowseMode::Remove) => "type to filter  ↑/↓ move  tab mark  enter remove  esc list",
            (Focus::SearchInput, _) => "type to search  ↑/↓ move  tab mark  enter install  esc list",
            (Focus::List, BrowseMode::Install) => {
                "/ search  j/k move  tab mark  enter install  * marks  i/n/r/u mode  q quit"
            }
            (Focus::List, BrowseMode::Remove) => {
                "/ filter  j/k move  tab mark  enter remove  * marks  i/n/r/u mode  q quit"
            }
            (Focus::List, BrowseMode::Dashboard) => "t/e/f/o browse  c clean  R orphans  ctrl+r refresh  q quit",
            (Focus::List, BrowseMode::Update) => "enter update  u recheck  ctrl+r refresh  q quit",
        }
    }
}
