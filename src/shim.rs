//! Zellij plugin wrapper.
//!
//! The thin layer between the library and the Zellij host: it maps host
//! events to [`Event`]s, feeds them to [`handle_event`], and runs the
//! resulting actions through [`ZellijHost`], the [`Executor`] backed by
//! Zellij's host functions.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, build `AppState` and theme
//! 2. **Subscribe**: key, command result, command pane exit, timer and
//!    permission events
//! 3. **Permissions granted**: the catalog listing starts
//! 4. **Update**: translate, handle, dispatch
//! 5. **Render**: call the library renderer
//!
//! # Host Requests
//!
//! - Captured commands (`run_command`) come back as `RunCommandResult`
//! - Interactive operations open a floating command pane whose exit comes
//!   back as `CommandPaneExited`
//! - Debounce wakeups use `set_timeout` and come back as `Timer`
//!
//! Both command events carry the context map written by the backend, which
//! [`decode_command_result`] and [`decode_pane_exit`] turn into completions.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use zellij_tile::prelude::*;

use zacman::app::AppState;
use zacman::backend::{decode_command_result, decode_pane_exit, dispatch, BackendConfig, CommandPlan, Executor};
use zacman::{handle_event, Config, Event, Key, Theme};

/// Plugin state wrapper.
pub struct State {
    app: AppState,
    theme: Theme,
    backend: BackendConfig,
    host: ZellijHost,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        let (app, theme) = zacman::initialize(&config);
        Self {
            app,
            theme,
            backend: config.backend(),
            host: ZellijHost,
        }
    }
}

/// [`Executor`] over Zellij host calls.
pub struct ZellijHost;

impl Executor for ZellijHost {
    fn run_command(&mut self, plan: &CommandPlan) {
        let argv: Vec<&str> = plan.argv.iter().map(String::as_str).collect();
        run_command(&argv, plan.context.clone());
    }

    fn open_interactive(&mut self, plan: &CommandPlan) {
        let Some((program, args)) = plan.argv.split_first() else {
            tracing::warn!("interactive plan without a program");
            return;
        };
        let command = CommandToRun {
            path: PathBuf::from(program),
            args: args.to_vec(),
            cwd: None,
        };
        open_command_pane_floating(command, None, plan.context.clone());
    }

    fn set_timeout(&mut self, delay: Duration) {
        set_timeout(delay.as_secs_f64());
    }

    fn close(&mut self) {
        hide_self();
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zacman::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(aur_helper = %config.aur_helper, min_query_len = config.min_query_len, "parsed configuration");
        let (app, theme) = zacman::initialize(&config);
        self.app = app;
        self.theme = theme;
        self.backend = config.backend();

        request_permission(&[
            PermissionType::RunCommands,
            PermissionType::OpenTerminalsOrPlugins,
            PermissionType::ChangeApplicationState,
            PermissionType::ReadApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::RunCommandResult,
            EventType::CommandPaneExited,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let span = tracing::debug_span!("plugin_update_event", event_type = %Self::event_name(&event));
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match Self::map_key(key) {
                Some(key) => Event::Key(key),
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_) => Event::Tick,
            zellij_tile::prelude::Event::RunCommandResult(exit_code, stdout, stderr, context) => {
                match decode_command_result(exit_code, &stdout, &stderr, &context) {
                    Ok(completion) => Event::Completed(completion),
                    Err(e) => {
                        tracing::warn!(error = %e, "dropping unrecognized command result");
                        return false;
                    }
                }
            }
            zellij_tile::prelude::Event::CommandPaneExited(pane_id, exit_code, context) => {
                tracing::debug!(pane_id, exit_code = ?exit_code, "command pane exited");
                match decode_pane_exit(exit_code, &context) {
                    Ok(completion) => Event::Completed(completion),
                    Err(e) => {
                        tracing::debug!(error = %e, "ignoring exit of unrelated pane");
                        return false;
                    }
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => Event::PermissionsGranted,
                PermissionStatus::Denied => Event::PermissionsDenied,
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event, Instant::now()) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    if let Err(e) = dispatch(action, &self.backend, &mut self.host) {
                        tracing::error!(error = %e, action = ?action, "failed to execute action");
                    }
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        zacman::ui::render(&self.app, &self.theme, rows, cols);
    }
}

impl State {
    fn event_name(event: &zellij_tile::prelude::Event) -> &'static str {
        match event {
            zellij_tile::prelude::Event::Key(_) => "Key",
            zellij_tile::prelude::Event::Timer(_) => "Timer",
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult",
            zellij_tile::prelude::Event::CommandPaneExited(..) => "CommandPaneExited",
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult",
            _ => "Other",
        }
    }

    fn map_key(key: &KeyWithModifier) -> Option<Key> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char(c) => Some(Key::Ctrl(c)),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Char(c) => Key::Char(c),
            BareKey::Up => Key::Up,
            BareKey::Down => Key::Down,
            BareKey::Left => Key::Left,
            BareKey::Right => Key::Right,
            BareKey::Enter => Key::Enter,
            BareKey::Esc => Key::Esc,
            BareKey::Tab => Key::Tab,
            BareKey::Backspace => Key::Backspace,
            _ => return None,
        })
    }
}
