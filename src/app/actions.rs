//! Request descriptors produced by the dispatcher.
//!
//! [`handle_event`](super::handle_event) never talks to the package manager or the
//! host directly. It returns a `Vec<Action>` and the plugin shim turns each one
//! into a command through [`backend::dispatch`](crate::backend::dispatch). Every
//! request kind has exactly one matching [`Completion`](crate::backend::Completion)
//! variant that eventually flows back in.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A state-changing package operation that needs user confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Install,
    Uninstall,
    Update,
    CleanCache,
    RemoveOrphans,
}

impl ActionKind {
    /// Title-case name used in dialog and overlay titles.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Install => "Install",
            Self::Uninstall => "Uninstall",
            Self::Update => "System Update",
            Self::CleanCache => "Clean Cache",
            Self::RemoveOrphans => "Remove Orphans",
        }
    }

    /// Status text shown while the operation runs.
    #[must_use]
    pub fn progress_message(self, count: usize) -> String {
        match self {
            Self::Install => format!("Installing {count} package(s)..."),
            Self::Uninstall => format!("Uninstalling {count} package(s)..."),
            Self::Update => "Updating system...".to_string(),
            Self::CleanCache => "Cleaning package cache...".to_string(),
            Self::RemoveOrphans => format!("Removing {count} orphan package(s)..."),
        }
    }

    /// Status text shown after the operation succeeded.
    #[must_use]
    pub fn done_message(self, count: usize) -> String {
        match self {
            Self::Install => format!("Installed {count} package(s)"),
            Self::Uninstall => format!("Uninstalled {count} package(s)"),
            Self::Update => "System updated".to_string(),
            Self::CleanCache => "Package cache cleaned".to_string(),
            Self::RemoveOrphans => format!("Removed {count} orphan package(s)"),
        }
    }
}

/// Side effects requested by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hide the plugin pane.
    CloseFocus,

    /// List the sync database catalog (`pacman -Sl`).
    ListIndex,

    /// List installed packages with their explicit/foreign/orphan flags.
    ListInstalled,

    /// Search the AUR for `query`, tagged with the generation it was issued under.
    SearchRemote { query: String, generation: u64 },

    /// Fetch the detail text for one package. `local` asks the local database
    /// instead of the sync databases.
    FetchDetail { name: String, local: bool },

    /// Run a confirmed operation in an interactive pane.
    RunAction { kind: ActionKind, targets: Vec<String> },

    /// Gather dashboard figures.
    DashboardStats,

    /// Ask the helper for pending upgrades.
    CheckUpdates,

    /// List orphaned dependencies.
    ListOrphans,

    /// Deliver a timer tick after this delay.
    ScheduleWakeup(Duration),
}
