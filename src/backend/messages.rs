//! Completion messages delivered back to the dispatcher.
//!
//! Each [`Action`](crate::app::Action) that starts a command yields exactly one
//! `Completion` variant once the command finishes. Failures are carried as
//! `Err(String)` inside the variant rather than as a separate message, so the
//! dispatcher can always tell which request failed.

use crate::app::ActionKind;
use crate::domain::{DashboardStats, PackageRecord, PendingUpdate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Result of `Action::ListIndex`.
    IndexListed {
        result: Result<Vec<PackageRecord>, String>,
    },

    /// Result of `Action::ListInstalled`.
    InstalledListed {
        result: Result<Vec<PackageRecord>, String>,
    },

    /// Result of `Action::SearchRemote`, tagged with the query it answers.
    RemoteSearched {
        query: String,
        generation: u64,
        result: Result<Vec<PackageRecord>, String>,
    },

    /// Result of `Action::FetchDetail`.
    DetailFetched {
        name: String,
        result: Result<String, String>,
    },

    /// The interactive pane of `Action::RunAction` exited.
    ActionFinished {
        kind: ActionKind,
        targets: Vec<String>,
        /// `None` when the pane was closed before the command reported a code.
        exit_code: Option<i32>,
    },

    /// Result of `Action::DashboardStats`.
    DashboardLoaded {
        result: Result<DashboardStats, String>,
    },

    /// Result of `Action::CheckUpdates`.
    UpdatesChecked {
        result: Result<Vec<PendingUpdate>, String>,
    },

    /// Result of `Action::ListOrphans`.
    OrphansListed {
        result: Result<Vec<String>, String>,
    },
}

impl Completion {
    /// Short name for log fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::IndexListed { .. } => "IndexListed",
            Self::InstalledListed { .. } => "InstalledListed",
            Self::RemoteSearched { .. } => "RemoteSearched",
            Self::DetailFetched { .. } => "DetailFetched",
            Self::ActionFinished { .. } => "ActionFinished",
            Self::DashboardLoaded { .. } => "DashboardLoaded",
            Self::UpdatesChecked { .. } => "UpdatesChecked",
            Self::OrphansListed { .. } => "OrphansListed",
        }
    }
}
