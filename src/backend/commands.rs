//! Command plans and result decoding.
//!
//! An [`Action`] becomes a [`CommandPlan`]: the argv to run plus a context map
//! the host hands back untouched with the result. The context names the
//! request and carries whatever the completion needs to be matched up again
//! (query and generation, package name, operation and targets).

use super::messages::Completion;
use super::parse;
use crate::app::{Action, ActionKind};
use crate::domain::{Result, ZacmanError};
use std::collections::BTreeMap;

pub const CTX_REQUEST: &str = "request";
pub const CTX_QUERY: &str = "query";
pub const CTX_GENERATION: &str = "generation";
pub const CTX_NAME: &str = "name";
pub const CTX_ACTION: &str = "action";
pub const CTX_TARGETS: &str = "targets";

/// Request tag stored under [`CTX_REQUEST`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    ListIndex,
    ListInstalled,
    SearchRemote,
    FetchDetail,
    RunAction,
    DashboardStats,
    CheckUpdates,
    ListOrphans,
}

impl RequestKind {
    const ALL: [Self; 8] = [
        Self::ListIndex,
        Self::ListInstalled,
        Self::SearchRemote,
        Self::FetchDetail,
        Self::RunAction,
        Self::DashboardStats,
        Self::CheckUpdates,
        Self::ListOrphans,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListIndex => "list_index",
            Self::ListInstalled => "list_installed",
            Self::SearchRemote => "search_remote",
            Self::FetchDetail => "fetch_detail",
            Self::RunAction => "run_action",
            Self::DashboardStats => "dashboard_stats",
            Self::CheckUpdates => "check_updates",
            Self::ListOrphans => "list_orphans",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == value)
    }
}

/// A command line plus the context that comes back with its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    pub argv: Vec<String>,
    pub context: BTreeMap<String, String>,
}

impl CommandPlan {
    fn new(request: RequestKind, argv: &[&str]) -> Self {
        let mut context = BTreeMap::new();
        context.insert(CTX_REQUEST.to_string(), request.as_str().to_string());
        Self {
            argv: argv.iter().map(|s| (*s).to_string()).collect(),
            context,
        }
    }

    fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.context.insert(key.to_string(), value.into());
        self
    }

    fn args(mut self, extra: &[String]) -> Self {
        self.argv.extend(extra.iter().cloned());
        self
    }
}

/// Installed packages with the extra listings needed for their flags.
fn installed_script() -> String {
    [
        "echo ::installed; pacman -Qi",
        "echo ::foreign; pacman -Qmq",
        "echo ::explicit; pacman -Qeq",
        "echo ::orphan; pacman -Qdtq",
        "echo ::sync; pacman -Sl",
    ]
    .join("\n")
}

/// Dashboard figures. Steps that may legitimately fail (no orphans, missing
/// cache directory) must not fail the script.
fn dashboard_script(helper: &str) -> String {
    [
        "echo ::total; pacman -Qq | wc -l".to_string(),
        "echo ::explicit; pacman -Qeq | wc -l".to_string(),
        "echo ::foreign; pacman -Qmq | wc -l".to_string(),
        "echo ::orphan; pacman -Qdtq | wc -l".to_string(),
        format!("echo ::stats; {helper} -Ps"),
        "echo ::pacman_cache; du -sb /var/cache/pacman/pkg 2>/dev/null".to_string(),
        format!("echo ::helper_cache; du -sb \"$HOME/.cache/{helper}\" 2>/dev/null"),
        "true".to_string(),
    ]
    .join("\n")
}

/// Builds the captured command for a query action.
///
/// Returns `None` for actions that do not run a captured command
/// (`CloseFocus`, `ScheduleWakeup`, `RunAction`).
#[must_use]
pub fn plan_query(action: &Action, helper: &str) -> Option<CommandPlan> {
    let plan = match action {
        Action::ListIndex => CommandPlan::new(RequestKind::ListIndex, &["pacman", "-Sl"]),
        Action::ListInstalled => {
            CommandPlan::new(RequestKind::ListInstalled, &["sh", "-c", installed_script().as_str()])
        }
        Action::SearchRemote { query, generation } => {
            CommandPlan::new(RequestKind::SearchRemote, &[helper, "-Ss", "-a", query.as_str()])
                .with(CTX_QUERY, query.clone())
                .with(CTX_GENERATION, generation.to_string())
        }
        Action::FetchDetail { name, local } => {
            let argv: [&str; 3] = if *local {
                ["pacman", "-Qi", name.as_str()]
            } else {
                [helper, "-Si", name.as_str()]
            };
            CommandPlan::new(RequestKind::FetchDetail, &argv).with(CTX_NAME, name.clone())
        }
        Action::DashboardStats => {
            CommandPlan::new(RequestKind::DashboardStats, &["sh", "-c", dashboard_script(helper).as_str()])
        }
        Action::CheckUpdates => CommandPlan::new(RequestKind::CheckUpdates, &[helper, "-Qu"]),
        Action::ListOrphans => CommandPlan::new(RequestKind::ListOrphans, &["pacman", "-Qdtq"]),
        Action::CloseFocus | Action::ScheduleWakeup(_) | Action::RunAction { .. } => return None,
    };

    Some(plan)
}

/// Builds the interactive command for a confirmed operation.
///
/// # Errors
///
/// Returns [`ZacmanError::Serialization`] if the operation or its targets
/// cannot be encoded into the context.
pub fn plan_interactive(kind: ActionKind, targets: &[String], helper: &str) -> Result<CommandPlan> {
    let flag = match kind {
        ActionKind::Install => "-S",
        ActionKind::Uninstall | ActionKind::RemoveOrphans => "-Rns",
        ActionKind::Update => "-Syu",
        ActionKind::CleanCache => "-Sc",
    };

    Ok(CommandPlan::new(RequestKind::RunAction, &[helper, flag])
        .args(targets)
        .with(CTX_ACTION, serde_json::to_string(&kind)?)
        .with(CTX_TARGETS, serde_json::to_string(targets)?))
}

fn context_value<'a>(context: &'a BTreeMap<String, String>, key: &str) -> Result<&'a str> {
    context
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| ZacmanError::Command(format!("missing context key '{key}'")))
}

/// Reads the request tag of a result's context.
///
/// # Errors
///
/// Returns [`ZacmanError::Command`] when the tag is missing or unknown, which
/// means the result belongs to a command this plugin did not start.
pub fn request_kind(context: &BTreeMap<String, String>) -> Result<RequestKind> {
    let value = context_value(context, CTX_REQUEST)?;
    RequestKind::parse(value).ok_or_else(|| ZacmanError::Command(format!("unknown request '{value}'")))
}

/// Error text for a failed command: stderr if it said anything, else the code.
fn failure(exit_code: Option<i32>, stderr: &[u8]) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        exit_code.map_or_else(|| "command was terminated".to_string(), |c| format!("exit code {c}"))
    } else {
        stderr.lines().last().unwrap_or(stderr).to_string()
    }
}

/// Turns a captured command result into its completion.
///
/// # Errors
///
/// Returns [`ZacmanError::Command`] for results without a known request tag
/// or for interactive results, and [`ZacmanError::Parse`] when the context
/// carries a malformed generation.
pub fn decode_command_result(
    exit_code: Option<i32>,
    stdout: &[u8],
    stderr: &[u8],
    context: &BTreeMap<String, String>,
) -> Result<Completion> {
    let kind = request_kind(context)?;
    let ok = exit_code == Some(0);
    let text = String::from_utf8_lossy(stdout);

    let completion = match kind {
        RequestKind::ListIndex => Completion::IndexListed {
            result: if ok {
                Ok(parse::parse_sync_list(&text))
            } else {
                Err(failure(exit_code, stderr))
            },
        },
        RequestKind::ListInstalled => Completion::InstalledListed {
            result: if ok {
                Ok(parse::parse_installed(&text))
            } else {
                Err(failure(exit_code, stderr))
            },
        },
        RequestKind::SearchRemote => {
            let generation = context_value(context, CTX_GENERATION)?;
            Completion::RemoteSearched {
                query: context_value(context, CTX_QUERY)?.to_string(),
                generation: generation
                    .parse()
                    .map_err(|_| ZacmanError::Parse(format!("invalid generation '{generation}'")))?,
                result: if ok {
                    Ok(parse::parse_remote_search(&text))
                } else {
                    Err(failure(exit_code, stderr))
                },
            }
        }
        RequestKind::FetchDetail => Completion::DetailFetched {
            name: context_value(context, CTX_NAME)?.to_string(),
            result: if ok {
                Ok(text.trim_end().to_string())
            } else {
                Err(failure(exit_code, stderr))
            },
        },
        RequestKind::DashboardStats => Completion::DashboardLoaded {
            result: if ok {
                Ok(parse::parse_dashboard(&text))
            } else {
                Err(failure(exit_code, stderr))
            },
        },
        // Both exit non-zero with empty output when there is nothing to report.
        RequestKind::CheckUpdates => Completion::UpdatesChecked {
            result: if ok || (text.trim().is_empty() && exit_code.is_some()) {
                Ok(parse::parse_updates(&text))
            } else {
                Err(failure(exit_code, stderr))
            },
        },
        RequestKind::ListOrphans => Completion::OrphansListed {
            result: if ok || (text.trim().is_empty() && exit_code.is_some()) {
                Ok(parse::parse_name_list(&text))
            } else {
                Err(failure(exit_code, stderr))
            },
        },
        RequestKind::RunAction => {
            return Err(ZacmanError::Command("interactive result delivered as captured output".into()));
        }
    };

    Ok(completion)
}

/// Turns an exited interactive pane into [`Completion::ActionFinished`].
///
/// # Errors
///
/// Returns [`ZacmanError::Command`] if the context does not describe an
/// operation, and [`ZacmanError::Serialization`] if its payload is malformed.
pub fn decode_pane_exit(exit_code: Option<i32>, context: &BTreeMap<String, String>) -> Result<Completion> {
    if request_kind(context)? != RequestKind::RunAction {
        return Err(ZacmanError::Command("pane exit for a non-interactive request".into()));
    }

    Ok(Completion::ActionFinished {
        kind: serde_json::from_str(context_value(context, CTX_ACTION)?)?,
        targets: serde_json::from_str(context_value(context, CTX_TARGETS)?)?,
        exit_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_search_round_trips_query_and_generation() {
        let action = Action::SearchRemote {
            query: "fire".into(),
            generation: 7,
        };
        let plan = plan_query(&action, "paru").unwrap();
        assert_eq!(plan.argv, vec!["paru", "-Ss", "-a", "fire"]);

        let completion = decode_command_result(Some(0), b"aur/firefox-nightly 128-1\n    Nightly\n", b"", &plan.context).unwrap();
        match completion {
            Completion::RemoteSearched { query, generation, result } => {
                assert_eq!(query, "fire");
                assert_eq!(generation, 7);
                assert_eq!(result.unwrap()[0].name, "firefox-nightly");
            }
            other => panic!("unexpected completion {other:?}"),
        }
    }

    #[test]
    fn detail_uses_local_database_when_asked() {
        let local = plan_query(
            &Action::FetchDetail {
                name: "bash".into(),
                local: true,
            },
            "yay",
        )
        .unwrap();
        assert_eq!(local.argv, vec!["pacman", "-Qi", "bash"]);

        let remote = plan_query(
            &Action::FetchDetail {
                name: "bash".into(),
                local: false,
            },
            "yay",
        )
        .unwrap();
        assert_eq!(remote.argv, vec!["yay", "-Si", "bash"]);
        assert_eq!(remote.context.get(CTX_NAME).map(String::as_str), Some("bash"));
    }

    #[test]
    fn failed_listing_reports_stderr() {
        let plan = plan_query(&Action::ListIndex, "paru").unwrap();
        let completion = decode_command_result(
            Some(1),
            b"",
            b"error: failed to init transaction\nerror: database is locked\n",
            &plan.context,
        )
        .unwrap();
        assert_eq!(
            completion,
            Completion::IndexListed {
                result: Err("error: database is locked".into())
            }
        );
    }

    #[test]
    fn empty_update_check_is_not_an_error() {
        let plan = plan_query(&Action::CheckUpdates, "paru").unwrap();
        let completion = decode_command_result(Some(1), b"", b"", &plan.context).unwrap();
        assert_eq!(completion, Completion::UpdatesChecked { result: Ok(Vec::new()) });
    }

    #[test]
    fn interactive_plan_carries_targets() {
        let targets = vec!["vim".to_string(), "git".to_string()];
        let plan = plan_interactive(ActionKind::Uninstall, &targets, "paru").unwrap();
        assert_eq!(plan.argv, vec!["paru", "-Rns", "vim", "git"]);

        let completion = decode_pane_exit(Some(1), &plan.context).unwrap();
        assert_eq!(
            completion,
            Completion::ActionFinished {
                kind: ActionKind::Uninstall,
                targets,
                exit_code: Some(1),
            }
        );
    }

    #[test]
    fn foreign_results_are_rejected() {
        let mut context = BTreeMap::new();
        assert!(matches!(
            decode_command_result(Some(0), b"", b"", &context),
            Err(ZacmanError::Command(_))
        ));

        context.insert(CTX_REQUEST.to_string(), "rebuild_mirrors".to_string());
        assert!(matches!(
            decode_command_result(Some(0), b"", b"", &context),
            Err(ZacmanError::Command(_))
        ));
    }

    #[test]
    fn local_only_actions_have_no_command() {
        assert_eq!(plan_query(&Action::CloseFocus, "paru"), None);
        assert_eq!(
            plan_query(&Action::ScheduleWakeup(std::time::Duration::from_millis(5)), "paru"),
            None
        );
    }
}
