//! Event handling and state transition logic.
//!
//! Every input the browser reacts to, whether a key press, a timer wakeup, or a
//! finished command, arrives here as an [`Event`]. [`handle_event`] mutates the
//! [`AppState`] and returns whether the screen needs a redraw together with the
//! [`Action`]s the plugin shim has to start.
//!
//! # Key routing
//!
//! Keys are offered to the layers below in order. The first layer that claims
//! a key consumes it:
//!
//! 1. `Ctrl+C` always closes the plugin
//! 2. an open modal (confirmation or error overlay)
//! 3. `Ctrl+R` manual refresh
//! 4. `*` toggles the selection panel while anything is marked
//! 5. the focused widget (selection panel, search input, or list)
//!
//! # Completions
//!
//! Answers to earlier actions come back as [`Completion`]s. Remote search and
//! detail answers are checked against the scheduler before they may touch the
//! state, so a slow answer for an old query or an old selection is dropped.
//!
//! # Example
//!
//! ```rust
//! use std::time::Instant;
//! use zacman::app::{handle_event, Action, AppState, Event, Key};
//!
//! let mut state = AppState::default();
//! let (_, actions) = handle_event(&mut state, &Event::Key(Key::Ctrl('c')), Instant::now())?;
//! assert_eq!(actions, vec![Action::CloseFocus]);
//! # Ok::<(), zacman::ZacmanError>(())
//! ```

use super::actions::{Action, ActionKind};
use super::modal::{Confirmation, ErrorOverlay, ModalOutcome, ModalState};
use super::modes::{BrowseMode, Focus};
use super::state::{AppState, DetailPane};
use crate::backend::Completion;
use crate::domain::error::Result;
use crate::domain::InstalledFilter;
use crate::scheduler::{Admission, DetailTick};
use std::time::Instant;

/// A key press, reduced to what the browser distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    /// A letter pressed together with Ctrl.
    Ctrl(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Tab,
    Backspace,
}

/// Inputs to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(Key),
    /// A wakeup requested through [`Action::ScheduleWakeup`].
    Tick,
    /// A command started by an earlier action finished.
    Completed(Completion),
    /// The host granted the permissions the plugin asked for.
    PermissionsGranted,
    PermissionsDenied,
}

impl Event {
    const fn name(&self) -> &'static str {
        match self {
            Self::Key(_) => "Key",
            Self::Tick => "Tick",
            Self::Completed(c) => c.name(),
            Self::PermissionsGranted => "PermissionsGranted",
            Self::PermissionsDenied => "PermissionsDenied",
        }
    }
}

/// Processes one event, mutates the state, and returns the actions to execute.
///
/// `now` is the time the event is handled at. Debounce deadlines are measured
/// against it, which keeps the handler deterministic under test.
///
/// # Returns
///
/// `(render, actions)`: whether the view changed, and the side effects to run
/// in order.
///
/// # Errors
///
/// Currently infallible; failures of earlier commands are folded into the
/// state as status lines or an error overlay.
pub fn handle_event(state: &mut AppState, event: &Event, now: Instant) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    let mut actions = Vec::new();
    let render = match event {
        Event::Key(key) => handle_key(state, *key, now, &mut actions),
        Event::Tick => handle_tick(state, now, &mut actions),
        Event::Completed(completion) => handle_completion(state, completion, now, &mut actions),
        Event::PermissionsGranted => {
            tracing::info!("permissions granted, loading package catalog");
            state.loading.index = true;
            actions.push(Action::ListIndex);
            true
        }
        Event::PermissionsDenied => {
            tracing::warn!("permissions denied");
            state.set_error("Permissions denied; package commands cannot run");
            true
        }
    };

    Ok((render, actions))
}

fn handle_key(state: &mut AppState, key: Key, now: Instant, actions: &mut Vec<Action>) -> bool {
    if key == Key::Ctrl('c') {
        actions.push(Action::CloseFocus);
        return false;
    }

    if let Some(outcome) = state.modal.handle_key(&key) {
        return apply_modal_outcome(state, outcome, actions);
    }

    if key == Key::Ctrl('r') {
        manual_refresh(state, actions);
        return true;
    }

    if key == Key::Char('*') && !state.selection.is_empty() {
        toggle_selection_panel(state);
        return true;
    }

    match state.focus {
        Focus::SelectionPanel => handle_panel_key(state, key),
        Focus::SearchInput => handle_input_key(state, key, now, actions),
        Focus::List => handle_list_key(state, key, now, actions),
    }
}

fn apply_modal_outcome(state: &mut AppState, outcome: ModalOutcome, actions: &mut Vec<Action>) -> bool {
    match outcome {
        ModalOutcome::Confirmed { kind, targets } => {
            tracing::info!(kind = ?kind, targets = targets.len(), "operation confirmed");
            if matches!(kind, ActionKind::Install | ActionKind::Uninstall) {
                state.selection.clear();
            }
            if state.focus == Focus::SelectionPanel {
                state.focus = Focus::List;
            }
            state.action_in_flight = Some(kind);
            state.set_info(kind.progress_message(targets.len()));
            actions.push(Action::RunAction { kind, targets });
        }
        ModalOutcome::Cancelled => state.set_info("Operation cancelled"),
        ModalOutcome::Dismissed => state.status = None,
        ModalOutcome::Scrolled => {}
        ModalOutcome::Ignored => {
            let hint = match state.modal {
                ModalState::ErrorOverlay(_) => "[esc] dismiss",
                _ => "[y] confirm  [n] cancel  [j/k] scroll",
            };
            state.set_info(hint);
        }
    }
    true
}

fn manual_refresh(state: &mut AppState, actions: &mut Vec<Action>) {
    tracing::info!(mode = ?state.mode, "manual refresh");
    state.refresh_failed = false;
    state.set_info("Refreshing...");

    match state.mode {
        BrowseMode::Install => {
            state.loading.index = true;
            actions.push(Action::ListIndex);
            maybe_search_remote(state, actions);
        }
        BrowseMode::Remove => {
            state.loading.installed = true;
            actions.push(Action::ListInstalled);
        }
        BrowseMode::Dashboard => {
            state.loading.dashboard = true;
            actions.push(Action::DashboardStats);
        }
        BrowseMode::Update => {
            state.loading.updates = true;
            actions.push(Action::CheckUpdates);
        }
    }
}

fn toggle_selection_panel(state: &mut AppState) {
    if state.focus == Focus::SelectionPanel {
        state.focus = Focus::List;
        state.status = None;
    } else {
        state.focus = Focus::SelectionPanel;
        state.panel.cursor = 0;
        state.set_info(format!(
            "{} marked - [tab] unmark  [enter] apply  [esc] close",
            state.selection.len()
        ));
    }
}

fn handle_panel_key(state: &mut AppState, key: Key) -> bool {
    match key {
        Key::Esc => {
            state.focus = Focus::List;
            state.status = None;
        }
        Key::Up | Key::Char('k') => state.panel.move_up(),
        Key::Down | Key::Char('j') => state.panel.move_down(state.selection.len()),
        Key::Tab => {
            let Some(name) = state.selection.nth(state.panel.cursor).map(str::to_string) else {
                return false;
            };
            state.selection.unmark(&name);
            state.panel.clamp(state.selection.len());

            if state.selection.is_empty() {
                state.focus = Focus::List;
                state.set_info("All marks cleared");
            } else {
                state.set_info(format!("Unmarked {name}; {} still marked", state.selection.len()));
            }
        }
        Key::Enter => {
            state.focus = Focus::List;
            open_marked_confirmation(state);
        }
        _ => return false,
    }
    true
}

fn handle_input_key(state: &mut AppState, key: Key, now: Instant, actions: &mut Vec<Action>) -> bool {
    match key {
        Key::Esc => {
            state.focus = Focus::List;
            true
        }
        Key::Up => move_cursor(state, -1, now, actions),
        Key::Down => move_cursor(state, 1, now, actions),
        Key::Enter => open_selected_confirmation(state),
        Key::Tab => toggle_mark(state),
        Key::Backspace => {
            if state.query.pop() {
                on_query_changed(state, now, actions);
                true
            } else {
                false
            }
        }
        Key::Char(c) => {
            state.query.push(c);
            on_query_changed(state, now, actions);
            true
        }
        _ => false,
    }
}

fn handle_list_key(state: &mut AppState, key: Key, now: Instant, actions: &mut Vec<Action>) -> bool {
    if let Key::Char(c) = key {
        if let Some(mode) = BrowseMode::from_hotkey(c) {
            switch_mode(state, mode, now, actions);
            return true;
        }
    }

    let has_list = state.mode.has_list();
    match key {
        Key::Char('q') => {
            actions.push(Action::CloseFocus);
            false
        }
        Key::Esc => {
            if state.selection.is_empty() {
                return false;
            }
            let count = state.selection.len();
            state.selection.clear();
            state.set_info(format!("Cleared {count} mark(s)"));
            true
        }
        Key::Char('/') if has_list => {
            state.focus = Focus::SearchInput;
            true
        }
        Key::Up | Key::Char('k') if has_list => move_cursor(state, -1, now, actions),
        Key::Down | Key::Char('j') if has_list => move_cursor(state, 1, now, actions),
        Key::Tab if has_list => toggle_mark(state),
        Key::Enter => match state.mode {
            BrowseMode::Install | BrowseMode::Remove => open_selected_confirmation(state),
            BrowseMode::Update => open_update_confirmation(state),
            BrowseMode::Dashboard => false,
        },
        Key::Char('c') if state.mode == BrowseMode::Dashboard => {
            state.open_confirmation(Confirmation::with_lines(
                ActionKind::CleanCache,
                Vec::new(),
                vec!["Remove cached package files that are no longer installed".to_string()],
            ));
            true
        }
        Key::Char('R') if state.mode == BrowseMode::Dashboard => request_orphan_removal(state, actions),
        Key::Char(c) if state.mode == BrowseMode::Dashboard => {
            let Some(filter) = InstalledFilter::from_letter(c) else {
                return false;
            };
            switch_mode(state, BrowseMode::Remove, now, actions);
            state.focus = Focus::List;
            state.query.set_raw(format!("{}:", filter.letter()));
            on_query_changed(state, now, actions);
            state.set_info(format!("Showing {} packages", filter.label()));
            true
        }
        _ => false,
    }
}

fn move_cursor(state: &mut AppState, delta: isize, now: Instant, actions: &mut Vec<Action>) -> bool {
    let before = state.cursor;
    state.move_cursor(delta);
    if state.cursor == before {
        return false;
    }
    sync_details(state, now, actions);
    true
}

fn toggle_mark(state: &mut AppState) -> bool {
    let Some(name) = state.selected_name().map(str::to_string) else {
        return false;
    };
    let marked = state.selection.toggle(&name);
    tracing::debug!(package = %name, marked, total = state.selection.len(), "mark toggled");
    state.set_info(format!(
        "{} {name} ({} marked)",
        if marked { "Marked" } else { "Unmarked" },
        state.selection.len()
    ));
    true
}

fn switch_mode(state: &mut AppState, mode: BrowseMode, now: Instant, actions: &mut Vec<Action>) {
    tracing::debug!(from = ?state.mode, to = ?mode, "switching browse mode");

    if state.mode != mode {
        state.mode = mode;
        state.query.clear();
        state.remote.reset();
        state.cursor = 0;
        // remove mode shows the local block, install mode the sync one
        state.details.reset();
        state.detail_pane = DetailPane::Empty;
    }
    state.focus = if mode == BrowseMode::Install {
        Focus::SearchInput
    } else {
        Focus::List
    };

    match mode {
        BrowseMode::Install => {
            if state.index.is_empty() && !state.loading.index {
                state.loading.index = true;
                actions.push(Action::ListIndex);
            }
        }
        BrowseMode::Remove => {
            state.loading.installed = true;
            actions.push(Action::ListInstalled);
        }
        BrowseMode::Dashboard => {
            state.loading.dashboard = true;
            actions.push(Action::DashboardStats);
        }
        BrowseMode::Update => {
            state.loading.updates = true;
            state.set_info("Checking for updates...");
            actions.push(Action::CheckUpdates);
        }
    }

    state.remerge();
    sync_details(state, now, actions);
}

/// Re-runs everything that depends on the query text.
fn on_query_changed(state: &mut AppState, now: Instant, actions: &mut Vec<Action>) {
    tracing::trace!(query = %state.query.raw(), generation = state.query.generation(), "query changed");

    if state.mode == BrowseMode::Install {
        if state.query.filters().is_empty() && !state.remote.meets_min_len(state.query.text()) {
            state.remote.reset();
        }
        maybe_search_remote(state, actions);
    }

    state.remerge();
    sync_details(state, now, actions);
}

fn maybe_search_remote(state: &mut AppState, actions: &mut Vec<Action>) {
    if state.refresh_failed {
        return;
    }
    if let Some(search) = state.remote.should_search(&state.query) {
        tracing::debug!(query = %search.query, generation = search.generation, "remote search issued");
        actions.push(Action::SearchRemote {
            query: search.query,
            generation: search.generation,
        });
    }
}

fn sync_details(state: &mut AppState, now: Instant, actions: &mut Vec<Action>) {
    if let Some(delay) = state.sync_detail_target(now) {
        actions.push(Action::ScheduleWakeup(delay));
    }
}

fn open_selected_confirmation(state: &mut AppState) -> bool {
    if !state.selection.is_empty() {
        return open_marked_confirmation(state);
    }

    let Some(name) = state.selected_name().map(str::to_string) else {
        return false;
    };

    match state.mode {
        BrowseMode::Install if state.is_installed(&name) => {
            state.set_info(format!("{name} is already installed"));
            true
        }
        BrowseMode::Install => {
            state.open_confirmation(Confirmation::for_targets(ActionKind::Install, vec![name]));
            true
        }
        BrowseMode::Remove => {
            state.open_confirmation(Confirmation::for_targets(ActionKind::Uninstall, vec![name]));
            true
        }
        BrowseMode::Dashboard | BrowseMode::Update => false,
    }
}

fn open_marked_confirmation(state: &mut AppState) -> bool {
    match state.mode {
        BrowseMode::Install => {
            let targets: Vec<String> = state
                .selection
                .iter()
                .filter(|name| !state.is_installed(name))
                .map(str::to_string)
                .collect();
            if targets.is_empty() {
                state.set_info("All marked packages are already installed");
            } else {
                state.open_confirmation(Confirmation::for_targets(ActionKind::Install, targets));
            }
        }
        BrowseMode::Remove => {
            let targets: Vec<String> = state
                .selection
                .iter()
                .filter(|name| state.is_installed(name))
                .map(str::to_string)
                .collect();
            if targets.is_empty() {
                state.set_info("None of the marked packages are installed");
            } else {
                state.open_confirmation(Confirmation::for_targets(ActionKind::Uninstall, targets));
            }
        }
        BrowseMode::Dashboard | BrowseMode::Update => {
            state.set_info("Switch to install or remove mode to act on marked packages");
        }
    }
    true
}

fn open_update_confirmation(state: &mut AppState) -> bool {
    if state.updates.is_empty() {
        return false;
    }
    let lines = state
        .updates
        .iter()
        .map(|u| format!("{} {}", u.name, u.versions))
        .collect();
    state.open_confirmation(Confirmation::with_lines(ActionKind::Update, Vec::new(), lines));
    true
}

fn request_orphan_removal(state: &mut AppState, actions: &mut Vec<Action>) -> bool {
    let orphans = state.dashboard.as_ref().map_or(0, |d| d.orphan_packages);
    if orphans == 0 {
        state.set_info("No orphan packages");
        return true;
    }
    actions.push(Action::ListOrphans);
    true
}

fn handle_tick(state: &mut AppState, now: Instant, actions: &mut Vec<Action>) -> bool {
    if state.refresh_failed {
        state.details.cancel();
        return false;
    }

    match state.details.tick(now) {
        DetailTick::Fetch(name) => {
            tracing::debug!(package = %name, "fetching details");
            let local = state.mode == BrowseMode::Remove;
            actions.push(Action::FetchDetail { name, local });
            false
        }
        DetailTick::Wait(delay) => {
            actions.push(Action::ScheduleWakeup(delay));
            false
        }
        DetailTick::Idle => false,
    }
}

#[allow(clippy::too_many_lines)]
fn handle_completion(state: &mut AppState, completion: &Completion, now: Instant, actions: &mut Vec<Action>) -> bool {
    match completion {
        Completion::IndexListed { result } => {
            state.loading.index = false;
            match result {
                Ok(records) => {
                    tracing::info!(packages = records.len(), "package catalog loaded");
                    state.index.clone_from(records);
                    listing_succeeded(state);
                    if state.mode == BrowseMode::Install {
                        maybe_search_remote(state, actions);
                    }
                    state.remerge();
                    sync_details(state, now, actions);
                }
                Err(e) => listing_failed(state, "package catalog", e),
            }
            true
        }
        Completion::InstalledListed { result } => {
            state.loading.installed = false;
            match result {
                Ok(records) => {
                    tracing::info!(packages = records.len(), "installed packages loaded");
                    state.installed.clone_from(records);
                    listing_succeeded(state);
                    state.remerge();
                    sync_details(state, now, actions);
                }
                Err(e) => listing_failed(state, "installed packages", e),
            }
            true
        }
        Completion::RemoteSearched { query, generation, result } => {
            let admission = state
                .remote
                .accept(query, *generation, result.clone(), state.query.text());
            tracing::debug!(query = %query, generation, admission = ?admission, "remote search answered");

            if admission == Admission::Discarded || state.mode != BrowseMode::Install {
                return false;
            }
            state.remerge();
            sync_details(state, now, actions);
            true
        }
        Completion::DetailFetched { name, result } => {
            let accepted = state.details.accept(name) && state.selected_name() == Some(name.as_str());
            if !accepted {
                tracing::debug!(package = %name, "discarding stale details");
                return false;
            }

            state.detail_pane = match result {
                Ok(text) => DetailPane::Loaded {
                    name: name.clone(),
                    text: text.clone(),
                },
                Err(e) => {
                    tracing::warn!(package = %name, error = %e, "detail fetch failed");
                    DetailPane::Failed { name: name.clone() }
                }
            };
            true
        }
        Completion::ActionFinished { kind, targets, exit_code } => {
            action_finished(state, *kind, targets.len(), *exit_code, actions);
            true
        }
        Completion::DashboardLoaded { result } => {
            state.loading.dashboard = false;
            match result {
                Ok(stats) => state.dashboard = Some(stats.clone()),
                Err(e) => {
                    tracing::warn!(error = %e, "dashboard stats failed");
                    state.set_error(format!("Failed to load dashboard: {e}"));
                }
            }
            true
        }
        Completion::UpdatesChecked { result } => {
            state.loading.updates = false;
            match result {
                Ok(updates) => {
                    tracing::info!(updates = updates.len(), "update check finished");
                    state.updates.clone_from(updates);
                    if updates.is_empty() {
                        state.set_success("System is up to date!");
                    } else if state.mode == BrowseMode::Update {
                        open_update_confirmation(state);
                    } else {
                        state.set_info(format!("{} update(s) available", updates.len()));
                    }
                }
                Err(e) => state.set_error(format!("Failed to check for updates: {e}")),
            }
            true
        }
        Completion::OrphansListed { result } => {
            match result {
                Ok(names) if names.is_empty() => state.set_info("No orphan packages"),
                Ok(names) => {
                    state.open_confirmation(Confirmation::for_targets(ActionKind::RemoveOrphans, names.clone()));
                }
                Err(e) => state.set_error(format!("Failed to list orphans: {e}")),
            }
            true
        }
    }
}

fn listing_succeeded(state: &mut AppState) {
    if state.refresh_failed {
        state.refresh_failed = false;
        state.status = None;
    }
    state.rebuild_installed_names();
    state.details.invalidate();
}

fn listing_failed(state: &mut AppState, what: &str, error: &str) {
    tracing::error!(listing = what, error = %error, "listing failed");
    state.refresh_failed = true;
    state.details.cancel();
    state.set_error(format!("Failed to load {what}: {error} (Ctrl+r to retry)"));
}

fn action_finished(
    state: &mut AppState,
    kind: ActionKind,
    count: usize,
    exit_code: Option<i32>,
    actions: &mut Vec<Action>,
) {
    state.action_in_flight = None;

    if exit_code == Some(0) {
        tracing::info!(kind = ?kind, count, "operation succeeded");
        state.set_success(kind.done_message(count));
        if kind == ActionKind::Update {
            state.updates.clear();
        }
    } else {
        tracing::warn!(kind = ?kind, exit_code = ?exit_code, "operation failed");
        state.status = None;
        state.modal = ModalState::ErrorOverlay(ErrorOverlay {
            title: format!("{} Failed", kind.title()),
            message: "The operation exited with a non-zero exit code.".to_string(),
            detail: exit_code.map_or_else(|| "Exit code: unknown".to_string(), |c| format!("Exit code: {c}")),
        });
    }

    match kind {
        ActionKind::Install | ActionKind::Update => {
            state.loading.index = true;
            actions.push(Action::ListIndex);
        }
        ActionKind::Uninstall => {
            state.loading.installed = true;
            actions.push(Action::ListInstalled);
        }
        ActionKind::CleanCache | ActionKind::RemoveOrphans => {
            state.loading.dashboard = true;
            actions.push(Action::DashboardStats);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PackageRecord;
    use std::time::Duration;

    fn key(state: &mut AppState, key: Key, now: Instant) -> Vec<Action> {
        handle_event(state, &Event::Key(key), now).map(|(_, a)| a).unwrap()
    }

    fn complete(state: &mut AppState, completion: Completion, now: Instant) -> Vec<Action> {
        handle_event(state, &Event::Completed(completion), now)
            .map(|(_, a)| a)
            .unwrap()
    }

    fn type_text(state: &mut AppState, text: &str, now: Instant) -> Vec<Action> {
        text.chars().flat_map(|c| key(state, Key::Char(c), now)).collect()
    }

    fn loaded_state(now: Instant) -> AppState {
        let mut state = AppState::default();
        let records = vec![
            PackageRecord::new("core", "vim", "9.1"),
            PackageRecord::new("extra", "gvim", "9.1"),
            PackageRecord::new("extra", "neovim", "0.10"),
        ];
        complete(&mut state, Completion::IndexListed { result: Ok(records) }, now);
        state
    }

    #[test]
    fn ctrl_c_closes_even_with_modal_open() {
        let now = Instant::now();
        let mut state = AppState::default();
        state.modal = ModalState::Confirmation(Confirmation::for_targets(ActionKind::Install, vec!["x".into()]));
        assert_eq!(key(&mut state, Key::Ctrl('c'), now), vec![Action::CloseFocus]);
    }

    #[test]
    fn typing_issues_one_remote_search_per_distinct_text() {
        let now = Instant::now();
        let mut state = loaded_state(now);

        let actions = type_text(&mut state, "vi", now);
        let searches: Vec<_> = actions
            .iter()
            .filter(|a| matches!(a, Action::SearchRemote { .. }))
            .collect();
        assert_eq!(searches.len(), 1);
        assert!(matches!(searches[0], Action::SearchRemote { query, .. } if query == "vi"));
    }

    #[test]
    fn repo_only_filter_does_not_search_remote() {
        let now = Instant::now();
        let mut state = loaded_state(now);
        let actions = type_text(&mut state, "e:vim", now);
        assert!(!actions.iter().any(|a| matches!(a, Action::SearchRemote { .. })));
        assert_eq!(state.results.names(), vec!["gvim", "neovim"]);
    }

    #[test]
    fn exact_remote_answer_replaces_prefix_fill() {
        let now = Instant::now();
        let mut state = loaded_state(now);
        type_text(&mut state, "fi", now);
        let old_generation = state.query.generation();
        type_text(&mut state, "re", now);

        let stale = Completion::RemoteSearched {
            query: "fi".into(),
            generation: old_generation,
            result: Ok(vec![PackageRecord::new("aur", "fish-git", "1")]),
        };
        complete(&mut state, stale, now);

        let exact = Completion::RemoteSearched {
            query: "fire".into(),
            generation: state.query.generation(),
            result: Ok(vec![PackageRecord::new("aur", "firefox-nightly", "1")]),
        };
        complete(&mut state, exact, now);

        assert_eq!(state.results.names(), vec!["firefox-nightly"]);
    }

    #[test]
    fn detail_fetch_waits_for_quiet_window() {
        let start = Instant::now();
        let mut state = loaded_state(start);
        let actions = type_text(&mut state, "vim", start);
        assert!(actions.contains(&Action::ScheduleWakeup(Duration::from_millis(150))));

        let (_, early) = handle_event(&mut state, &Event::Tick, start + Duration::from_millis(50)).unwrap();
        assert_eq!(early, vec![Action::ScheduleWakeup(Duration::from_millis(100))]);

        let (_, due) = handle_event(&mut state, &Event::Tick, start + Duration::from_millis(150)).unwrap();
        assert_eq!(
            due,
            vec![Action::FetchDetail {
                name: "vim".into(),
                local: false
            }]
        );
    }

    #[test]
    fn details_for_previous_selection_are_discarded() {
        let start = Instant::now();
        let mut state = loaded_state(start);
        type_text(&mut state, "vim", start);
        handle_event(&mut state, &Event::Tick, start + Duration::from_millis(200)).unwrap();

        key(&mut state, Key::Down, start + Duration::from_millis(210));
        let render = handle_event(
            &mut state,
            &Event::Completed(Completion::DetailFetched {
                name: "vim".into(),
                result: Ok("Name : vim".into()),
            }),
            start + Duration::from_millis(220),
        )
        .map(|(r, _)| r)
        .unwrap();

        assert!(!render);
        assert_eq!(state.detail_pane, DetailPane::Loading("gvim".into()));
    }

    #[test]
    fn failed_listing_suppresses_queries_until_manual_refresh() {
        let now = Instant::now();
        let mut state = AppState::default();
        complete(&mut state, Completion::IndexListed { result: Err("db locked".into()) }, now);
        assert!(state.refresh_failed);

        let actions = type_text(&mut state, "vim", now);
        assert!(actions.is_empty());

        let refresh = key(&mut state, Key::Ctrl('r'), now);
        assert!(refresh.contains(&Action::ListIndex));
        assert!(refresh.iter().any(|a| matches!(a, Action::SearchRemote { query, .. } if query == "vim")));
    }

    #[test]
    fn installed_selection_does_not_open_install_dialog() {
        let now = Instant::now();
        let mut state = AppState::default();
        let mut vim = PackageRecord::new("core", "vim", "9.1");
        vim.installed = true;
        complete(&mut state, Completion::IndexListed { result: Ok(vec![vim]) }, now);
        type_text(&mut state, "vim", now);

        key(&mut state, Key::Enter, now);
        assert!(!state.modal.is_open());
        assert_eq!(state.status.as_ref().map(|s| s.text.as_str()), Some("vim is already installed"));
    }

    #[test]
    fn dashboard_letter_jumps_to_filtered_remove_view() {
        let now = Instant::now();
        let mut state = AppState::default();
        key(&mut state, Key::Esc, now);
        key(&mut state, Key::Char('n'), now);
        assert_eq!(state.mode, BrowseMode::Dashboard);

        let actions = key(&mut state, Key::Char('o'), now);
        assert_eq!(state.mode, BrowseMode::Remove);
        assert_eq!(state.query.raw(), "o:");
        assert!(actions.contains(&Action::ListInstalled));
    }

    #[test]
    fn orphan_removal_needs_orphans() {
        let now = Instant::now();
        let mut state = AppState::default();
        state.mode = BrowseMode::Dashboard;
        state.focus = Focus::List;
        assert!(key(&mut state, Key::Char('R'), now).is_empty());

        state.dashboard = Some(crate::domain::DashboardStats {
            orphan_packages: 2,
            ..Default::default()
        });
        assert_eq!(key(&mut state, Key::Char('R'), now), vec![Action::ListOrphans]);

        complete(
            &mut state,
            Completion::OrphansListed {
                result: Ok(vec!["libfoo".into(), "libbar".into()]),
            },
            now,
        );
        let confirmed = key(&mut state, Key::Char('y'), now);
        assert_eq!(
            confirmed,
            vec![Action::RunAction {
                kind: ActionKind::RemoveOrphans,
                targets: vec!["libfoo".into(), "libbar".into()],
            }]
        );
    }

    #[test]
    fn successful_update_clears_pending_list() {
        let now = Instant::now();
        let mut state = AppState::default();
        state.updates = vec![crate::domain::PendingUpdate {
            name: "linux".into(),
            versions: "6.9 -> 6.10".into(),
        }];
        state.action_in_flight = Some(ActionKind::Update);

        let actions = complete(
            &mut state,
            Completion::ActionFinished {
                kind: ActionKind::Update,
                targets: Vec::new(),
                exit_code: Some(0),
            },
            now,
        );
        assert!(state.updates.is_empty());
        assert!(state.action_in_flight.is_none());
        assert_eq!(actions, vec![Action::ListIndex]);
    }

    fn shown(state: &mut AppState, name: &str, now: Instant) {
        complete(
            state,
            Completion::DetailFetched {
                name: name.into(),
                result: Ok(format!("Name : {name}")),
            },
            now,
        );
    }

    fn fetch(name: &str, local: bool) -> Vec<Action> {
        vec![Action::FetchDetail {
            name: name.into(),
            local,
        }]
    }

    #[test]
    fn returning_to_a_shown_package_after_its_neighbour_was_fetched_refetches_it() {
        let start = Instant::now();
        let at = |ms| start + Duration::from_millis(ms);
        let mut state = loaded_state(start);
        type_text(&mut state, "vim", start);
        handle_event(&mut state, &Event::Tick, at(200)).unwrap();
        shown(&mut state, "vim", at(210));

        key(&mut state, Key::Down, at(220));
        let (_, gvim) = handle_event(&mut state, &Event::Tick, at(400)).unwrap();
        assert_eq!(gvim, fetch("gvim", false));

        let up = key(&mut state, Key::Up, at(410));
        assert_eq!(up, vec![Action::ScheduleWakeup(Duration::from_millis(150))]);
        assert_eq!(state.detail_pane, DetailPane::Loading("vim".into()));

        shown(&mut state, "gvim", at(420));
        assert_eq!(state.detail_pane, DetailPane::Loading("vim".into()));

        let (_, due) = handle_event(&mut state, &Event::Tick, at(600)).unwrap();
        assert_eq!(due, fetch("vim", false));
        shown(&mut state, "vim", at(610));
        assert!(matches!(&state.detail_pane, DetailPane::Loaded { name, .. } if name == "vim"));
    }

    #[test]
    fn quick_down_and_up_still_reloads_the_shown_package() {
        let start = Instant::now();
        let at = |ms| start + Duration::from_millis(ms);
        let mut state = loaded_state(start);
        type_text(&mut state, "vim", start);
        handle_event(&mut state, &Event::Tick, at(200)).unwrap();
        shown(&mut state, "vim", at(210));

        key(&mut state, Key::Down, at(300));
        let up = key(&mut state, Key::Up, at(350));
        assert_eq!(up, vec![Action::ScheduleWakeup(Duration::from_millis(150))]);

        let (_, due) = handle_event(&mut state, &Event::Tick, at(500)).unwrap();
        assert_eq!(due, fetch("vim", false));
    }

    #[test]
    fn switching_to_remove_fetches_the_local_block() {
        let start = Instant::now();
        let at = |ms| start + Duration::from_millis(ms);
        let mut vim = PackageRecord::new("core", "vim", "9.1");
        vim.installed = true;
        let mut state = AppState::default();
        complete(&mut state, Completion::IndexListed { result: Ok(vec![vim.clone()]) }, start);
        complete(&mut state, Completion::InstalledListed { result: Ok(vec![vim]) }, start);

        type_text(&mut state, "vim", start);
        let (_, sync) = handle_event(&mut state, &Event::Tick, at(200)).unwrap();
        assert_eq!(sync, fetch("vim", false));
        shown(&mut state, "vim", at(210));

        key(&mut state, Key::Esc, at(220));
        let switched = key(&mut state, Key::Char('r'), at(230));
        assert!(switched.contains(&Action::ScheduleWakeup(Duration::from_millis(150))));
        assert_eq!(state.detail_pane, DetailPane::Loading("vim".into()));

        let (_, local) = handle_event(&mut state, &Event::Tick, at(400)).unwrap();
        assert_eq!(local, fetch("vim", true));
    }

    #[test]
    fn switching_mode_drops_the_in_flight_answer() {
        let start = Instant::now();
        let at = |ms| start + Duration::from_millis(ms);
        let mut vim = PackageRecord::new("core", "vim", "9.1");
        vim.installed = true;
        let mut state = AppState::default();
        complete(&mut state, Completion::IndexListed { result: Ok(vec![vim.clone()]) }, start);
        complete(&mut state, Completion::InstalledListed { result: Ok(vec![vim]) }, start);

        type_text(&mut state, "vim", start);
        handle_event(&mut state, &Event::Tick, at(200)).unwrap();
        key(&mut state, Key::Esc, at(210));
        key(&mut state, Key::Char('r'), at(220));

        shown(&mut state, "vim", at(230));
        assert_eq!(state.detail_pane, DetailPane::Loading("vim".into()));
    }

    #[test]
    fn unrelated_confirmation_keeps_marks() {
        let now = Instant::now();
        let mut state = loaded_state(now);
        type_text(&mut state, "vim", now);
        key(&mut state, Key::Tab, now);
        key(&mut state, Key::Esc, now);
        key(&mut state, Key::Char('n'), now);
        key(&mut state, Key::Char('c'), now);

        let actions = key(&mut state, Key::Char('y'), now);
        assert_eq!(
            actions,
            vec![Action::RunAction {
                kind: ActionKind::CleanCache,
                targets: Vec::new(),
            }]
        );
        assert_eq!(state.selection.len(), 1);

        state.action_in_flight = None;
        key(&mut state, Key::Char('i'), now);
        key(&mut state, Key::Enter, now);
        let install = key(&mut state, Key::Char('y'), now);
        assert_eq!(
            install,
            vec![Action::RunAction {
                kind: ActionKind::Install,
                targets: vec!["vim".into()],
            }]
        );
        assert!(state.selection.is_empty());
    }

    #[test]
    fn cancelled_confirmation_leaves_marks_and_runs_nothing() {
        for cancel in [Key::Char('n'), Key::Esc] {
            let now = Instant::now();
            let mut state = loaded_state(now);
            type_text(&mut state, "vim", now);
            key(&mut state, Key::Tab, now);
            key(&mut state, Key::Down, now);
            key(&mut state, Key::Tab, now);

            key(&mut state, Key::Enter, now);
            assert!(state.modal.is_open());

            let actions = key(&mut state, cancel, now);
            assert!(!actions.iter().any(|a| matches!(a, Action::RunAction { .. })));
            assert!(!state.modal.is_open());
            assert_eq!(state.selection.len(), 2);
            assert!(state.action_in_flight.is_none());
        }
    }
}
