//! Execution seam between actions and the host.
//!
//! [`dispatch`] turns one [`Action`] into calls on an [`Executor`]. The plugin
//! shim implements the trait with Zellij host functions; tests record the
//! calls instead.

use super::commands::{plan_interactive, plan_query, CommandPlan};
use crate::app::Action;
use crate::domain::Result;
use std::time::Duration;

/// Host capabilities the backend needs.
pub trait Executor {
    /// Runs a command with captured output; the result arrives as a completion.
    fn run_command(&mut self, plan: &CommandPlan);

    /// Opens an interactive pane; its exit arrives as a completion.
    fn open_interactive(&mut self, plan: &CommandPlan);

    /// Delivers a tick after `delay`.
    fn set_timeout(&mut self, delay: Duration);

    /// Hides the plugin.
    fn close(&mut self);
}

/// Backend settings taken from plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// AUR helper binary, e.g. `paru` or `yay`.
    pub helper: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            helper: "paru".to_string(),
        }
    }
}

/// Executes one action.
///
/// # Errors
///
/// Returns an error if an interactive operation cannot be encoded into its
/// command context. Nothing is started in that case.
pub fn dispatch<E: Executor + ?Sized>(action: &Action, config: &BackendConfig, executor: &mut E) -> Result<()> {
    match action {
        Action::CloseFocus => executor.close(),
        Action::ScheduleWakeup(delay) => executor.set_timeout(*delay),
        Action::RunAction { kind, targets } => {
            let plan = plan_interactive(*kind, targets, &config.helper)?;
            tracing::info!(argv = ?plan.argv, "opening interactive pane");
            executor.open_interactive(&plan);
        }
        query => {
            if let Some(plan) = plan_query(query, &config.helper) {
                tracing::debug!(argv = ?plan.argv.first(), request = ?plan.context.get("request"), "running command");
                executor.run_command(&plan);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ActionKind;

    #[derive(Default)]
    struct Recorder {
        captured: Vec<Vec<String>>,
        interactive: Vec<Vec<String>>,
        timeouts: Vec<Duration>,
        closed: bool,
    }

    impl Executor for Recorder {
        fn run_command(&mut self, plan: &CommandPlan) {
            self.captured.push(plan.argv.clone());
        }

        fn open_interactive(&mut self, plan: &CommandPlan) {
            self.interactive.push(plan.argv.clone());
        }

        fn set_timeout(&mut self, delay: Duration) {
            self.timeouts.push(delay);
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    #[test]
    fn actions_reach_the_right_host_call() {
        let config = BackendConfig::default();
        let mut recorder = Recorder::default();

        for action in [
            Action::ListIndex,
            Action::ScheduleWakeup(Duration::from_millis(150)),
            Action::RunAction {
                kind: ActionKind::Install,
                targets: vec!["ripgrep".into()],
            },
            Action::CloseFocus,
        ] {
            dispatch(&action, &config, &mut recorder).unwrap();
        }

        assert_eq!(recorder.captured, vec![vec!["pacman".to_string(), "-Sl".to_string()]]);
        assert_eq!(
            recorder.interactive,
            vec![vec!["paru".to_string(), "-S".to_string(), "ripgrep".to_string()]]
        );
        assert_eq!(recorder.timeouts, vec![Duration::from_millis(150)]);
        assert!(recorder.closed);
    }

    #[test]
    fn configured_helper_is_used() {
        let config = BackendConfig { helper: "yay".into() };
        let mut recorder = Recorder::default();
        dispatch(&Action::CheckUpdates, &config, &mut recorder).unwrap();
        assert_eq!(recorder.captured[0][0], "yay");
    }
}
