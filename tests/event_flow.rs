//! End-to-end flows: events go through `handle_event`, actions through
//! `backend::dispatch` into a recording host, and the recorded commands are
//! answered with canned package manager output.

use std::time::{Duration, Instant};

use zacman::app::{ActionKind, AppState, BrowseMode, DetailPane, Focus, ModalState};
use zacman::backend::{decode_command_result, decode_pane_exit, dispatch, CommandPlan, Executor};
use zacman::{handle_event, BackendConfig, Event, Key, Settings};

#[derive(Default)]
struct Host {
    captured: Vec<CommandPlan>,
    interactive: Vec<CommandPlan>,
    timeouts: Vec<Duration>,
    closed: bool,
}

impl Executor for Host {
    fn run_command(&mut self, plan: &CommandPlan) {
        self.captured.push(plan.clone());
    }

    fn open_interactive(&mut self, plan: &CommandPlan) {
        self.interactive.push(plan.clone());
    }

    fn set_timeout(&mut self, delay: Duration) {
        self.timeouts.push(delay);
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

struct Harness {
    state: AppState,
    host: Host,
    backend: BackendConfig,
    now: Instant,
}

const CATALOG: &str = "\
extra ripgrep 14.1.0-1
extra ripgrep-all 0.10.6-1 [installed]
core bash 5.2.026-2 [installed]
extra fd 10.1.0-1
";

const INSTALLED: &str = "\
::installed
Name            : bash
Version         : 5.2.026-2
Description     : The GNU Bourne Again shell

Name            : fd
Version         : 10.1.0-1
Description     : Simple, fast alternative to find

Name            : htop
Version         : 3.3.0-1
Description     : Interactive process viewer

Name            : paru
Version         : 2.0.3-1
Description     : Feature packed AUR helper
::foreign
paru
::explicit
bash
fd
htop
paru
::orphan
::sync
core bash 5.2.026-2 [installed]
extra fd 10.1.0-1 [installed]
extra htop 3.3.0-1 [installed]
";

impl Harness {
    fn new() -> Self {
        Self {
            state: AppState::new(Settings::default()),
            host: Host::default(),
            backend: BackendConfig::default(),
            now: Instant::now(),
        }
    }

    /// A harness whose catalog listing has already been answered.
    fn started() -> Self {
        let mut harness = Self::new();
        harness.send(Event::PermissionsGranted);
        let plan = harness.take_one(&["pacman", "-Sl"]);
        harness.reply(&plan, Some(0), CATALOG);
        harness.host.captured.clear();
        harness
    }

    fn send(&mut self, event: Event) -> bool {
        let (render, actions) = handle_event(&mut self.state, &event, self.now).unwrap();
        for action in &actions {
            dispatch(action, &self.backend, &mut self.host).unwrap();
        }
        render
    }

    fn key(&mut self, key: Key) -> bool {
        self.send(Event::Key(key))
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.key(Key::Char(c));
        }
    }

    fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Removes and returns the one captured command starting with `prefix`.
    fn take_one(&mut self, prefix: &[&str]) -> CommandPlan {
        let position = self
            .host
            .captured
            .iter()
            .position(|p| p.argv.iter().zip(prefix).all(|(a, b)| a == b))
            .unwrap_or_else(|| panic!("no command {prefix:?} in {:?}", self.host.captured));
        self.host.captured.remove(position)
    }

    fn reply(&mut self, plan: &CommandPlan, exit_code: Option<i32>, stdout: &str) -> bool {
        let completion = decode_command_result(exit_code, stdout.as_bytes(), b"", &plan.context).unwrap();
        self.send(Event::Completed(completion))
    }

    fn exit_pane(&mut self, plan: &CommandPlan, exit_code: Option<i32>) -> bool {
        let completion = decode_pane_exit(exit_code, &plan.context).unwrap();
        self.send(Event::Completed(completion))
    }
}

#[test]
fn startup_lists_the_catalog_once_permissions_arrive() {
    let mut harness = Harness::new();
    assert!(harness.host.captured.is_empty());

    harness.send(Event::PermissionsGranted);
    let plan = harness.take_one(&["pacman", "-Sl"]);
    harness.reply(&plan, Some(0), CATALOG);

    assert_eq!(harness.state.index.len(), 4);
    assert!(harness.state.is_installed("bash"));
    assert!(!harness.state.is_installed("fd"));
    assert!(harness.state.results.is_empty(), "empty query shows nothing in install view");
}

#[test]
fn stale_remote_answer_cannot_overwrite_the_exact_one() {
    let mut harness = Harness::started();
    harness.type_text("rip");

    let first = harness.take_one(&["paru", "-Ss", "-a", "ri"]);
    let second = harness.take_one(&["paru", "-Ss", "-a", "rip"]);

    harness.reply(&second, Some(0), "aur/ripgrep-git 14.1.0.r3-1 [+5 ~0.1]\n    ripgrep from git\n");
    assert!(!harness.reply(&first, Some(0), "aur/rizin 0.7-1 [+9 ~0.2]\n    reverse engineering\n"));

    let names = harness.state.results.names();
    assert!(names.contains(&"ripgrep-git"));
    assert!(names.contains(&"ripgrep"));
    assert!(!names.contains(&"rizin"));
}

#[test]
fn removing_three_marked_packages_runs_one_operation() {
    let mut harness = Harness::started();
    harness.key(Key::Esc);
    harness.key(Key::Char('r'));
    assert_eq!(harness.state.mode, BrowseMode::Remove);

    let listing = harness.take_one(&["sh", "-c"]);
    harness.reply(&listing, Some(0), INSTALLED);
    assert_eq!(harness.state.results.len(), 4);

    for _ in 0..3 {
        harness.key(Key::Tab);
        harness.key(Key::Char('j'));
    }
    assert_eq!(harness.state.selection.len(), 3);

    harness.key(Key::Enter);
    assert!(matches!(harness.state.modal, ModalState::Confirmation(_)));
    harness.key(Key::Char('y'));

    assert_eq!(harness.host.interactive.len(), 1);
    let pane = harness.host.interactive[0].clone();
    assert_eq!(pane.argv[..2], ["paru".to_string(), "-Rns".to_string()]);
    assert_eq!(pane.argv.len(), 5);
    assert!(harness.state.selection.is_empty());
    assert!(!harness.state.modal.is_open());
    assert_eq!(harness.state.action_in_flight, Some(ActionKind::Uninstall));

    harness.exit_pane(&pane, Some(0));
    assert_eq!(harness.state.action_in_flight, None);
    assert!(harness.state.status.as_ref().is_some_and(|s| s.text == "Uninstalled 3 package(s)"));
    harness.take_one(&["sh", "-c"]);
}

#[test]
fn failed_install_shows_overlay_and_still_refreshes() {
    let mut harness = Harness::started();
    harness.type_text("fd");
    harness.key(Key::Enter);
    harness.key(Key::Enter);

    let pane = harness.host.interactive.pop().unwrap();
    assert_eq!(pane.argv, vec!["paru", "-S", "fd"]);
    harness.host.captured.clear();

    harness.exit_pane(&pane, Some(1));
    match &harness.state.modal {
        ModalState::ErrorOverlay(overlay) => {
            assert_eq!(overlay.title, "Install Failed");
            assert_eq!(overlay.detail, "Exit code: 1");
        }
        other => panic!("expected error overlay, got {other:?}"),
    }
    harness.take_one(&["pacman", "-Sl"]);

    harness.key(Key::Esc);
    assert!(!harness.state.modal.is_open());
}

#[test]
fn details_are_fetched_after_the_quiet_window() {
    let mut harness = Harness::started();
    harness.type_text("fd");
    assert!(!harness.host.timeouts.is_empty());

    harness.advance(Duration::from_millis(50));
    harness.send(Event::Tick);
    assert!(!harness.host.captured.iter().any(|p| p.argv[1] == "-Si"));

    harness.advance(Duration::from_millis(150));
    harness.send(Event::Tick);
    let fetch = harness.take_one(&["paru", "-Si", "fd"]);

    harness.reply(&fetch, Some(0), "Name            : fd\nVersion         : 10.1.0-1\n");
    assert!(matches!(&harness.state.detail_pane, DetailPane::Loaded { name, .. } if name == "fd"));
}

#[test]
fn details_for_a_package_no_longer_selected_are_dropped() {
    let mut harness = Harness::started();
    harness.type_text("ripgrep");
    harness.host.captured.clear();

    harness.advance(Duration::from_millis(200));
    harness.send(Event::Tick);
    let fetch = harness.take_one(&["paru", "-Si"]);
    let first = fetch.argv[2].clone();

    harness.key(Key::Down);
    assert_ne!(harness.state.selected_name(), Some(first.as_str()));

    assert!(!harness.reply(&fetch, Some(0), "Name : whatever\n"));
    assert!(matches!(harness.state.detail_pane, DetailPane::Loading(_)));
}

#[test]
fn failed_catalog_listing_pauses_background_requests() {
    let mut harness = Harness::new();
    harness.send(Event::PermissionsGranted);
    let plan = harness.take_one(&["pacman", "-Sl"]);
    harness.reply(&plan, Some(1), "");
    assert!(harness.state.refresh_failed);

    harness.type_text("fd");
    assert!(!harness.host.captured.iter().any(|p| p.argv[1] == "-Ss"));

    harness.key(Key::Ctrl('r'));
    let retry = harness.take_one(&["pacman", "-Sl"]);
    harness.take_one(&["paru", "-Ss", "-a", "fd"]);
    harness.reply(&retry, Some(0), CATALOG);
    assert!(!harness.state.refresh_failed);
    assert_eq!(harness.state.selected_name(), Some("fd"));
}

#[test]
fn dashboard_letter_opens_filtered_remove_view() {
    let mut harness = Harness::started();
    harness.key(Key::Esc);
    harness.key(Key::Char('n'));
    let stats = harness.take_one(&["sh", "-c"]);
    harness.reply(&stats, Some(0), "::total\n4\n::foreign\n1\n::orphan\n0\n");

    harness.key(Key::Char('f'));
    assert_eq!(harness.state.mode, BrowseMode::Remove);
    assert_eq!(harness.state.focus, Focus::List);

    let listing = harness.take_one(&["sh", "-c"]);
    harness.reply(&listing, Some(0), INSTALLED);
    assert_eq!(harness.state.results.names(), vec!["paru"]);
}

#[test]
fn q_and_ctrl_c_hide_the_plugin() {
    let mut harness = Harness::started();
    harness.key(Key::Char('q'));
    assert!(!harness.host.closed, "q types into the search box");

    harness.key(Key::Ctrl('c'));
    assert!(harness.host.closed);
}
