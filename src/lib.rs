//! Zacman: a Zellij plugin for browsing, installing and removing Arch Linux
//! packages from the sync repositories and the AUR.
//!
//! The plugin provides:
//! - Fuzzy search over the sync catalog merged with live AUR results
//! - Repository filters (`c:` `e:` `m:` `a:`) and installed-package filters
//!   (`t:` `e:` `f:` `o:`)
//! - Multi-package marking with a review panel
//! - Confirmed install, uninstall, system update, cache cleaning and orphan
//!   removal in an interactive pane
//! - A dashboard with package counts, sizes and cache usage

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs, shim.rs)              │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, modes, selection, dialogs        │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Scheduling    │   │ Backend       │
//! │ (ui/)         │   │ (scheduler/,  │   │ (backend/)    │
//! │ - Rendering   │   │  search/)     │   │ - Commands    │
//! │ - Theming     │   │ - Debounce    │   │ - Parsers     │
//! │ - Components  │   │ - Merging     │   │ - Executor    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Package records, filters, errors (domain/)       │
//! │  - Logging (observability/)                         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Event Flow
//!
//! 1. The shim maps a Zellij event to an [`Event`]
//! 2. [`handle_event`] mutates [`AppState`] and returns [`Action`]s
//! 3. [`backend::dispatch`] runs each action through an [`backend::Executor`]
//! 4. Command results come back as [`backend::Completion`]s and re-enter at step 2
//! 5. [`ui::render`] draws the new state

pub mod app;
pub mod backend;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod scheduler;
pub mod search;
pub mod ui;

pub use app::{handle_event, Action, AppState, BrowseMode, Event, Key, Settings};
pub use backend::{BackendConfig, Completion};
pub use domain::{PackageRecord, Result, ZacmanError};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::time::Duration;

/// Helper used when none is configured or the configured one is rejected.
pub const DEFAULT_AUR_HELPER: &str = "paru";

/// Plugin configuration parsed from Zellij's configuration system.
///
/// ```kdl
/// plugin location="file:/path/to/zacman.wasm" {
///     aur_helper "yay"
///     min_query_len "3"
///     detail_debounce_ms "200"
///     theme "catppuccin-mocha"
///     theme_file "~/.config/zacman/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme: Option<String>,

    /// Path to a custom TOML theme file. `~` expands to the sandbox `/host`.
    pub theme_file: Option<String>,

    /// AUR helper binary used for remote search, details, updates and
    /// interactive operations. Default: `paru`
    pub aur_helper: String,

    /// Shortest search text that triggers results. Default: 2
    pub min_query_len: usize,

    /// Detail pane debounce in milliseconds. Default: 150
    pub detail_debounce_ms: u64,

    /// Log level filter, e.g. `debug` or `zacman=trace`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            theme: None,
            theme_file: None,
            aur_helper: DEFAULT_AUR_HELPER.to_string(),
            min_query_len: settings.min_query_len,
            detail_debounce_ms: u64::try_from(settings.detail_debounce.as_millis()).unwrap_or(150),
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unparsable values fall back to their defaults. The helper name is
    /// interpolated into shell scripts, so anything outside `[A-Za-z0-9._-]`
    /// is rejected in favor of the default.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use zacman::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("aur_helper".to_string(), "yay".to_string());
    /// map.insert("min_query_len".to_string(), "3".to_string());
    /// map.insert("detail_debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.aur_helper, "yay");
    /// assert_eq!(config.min_query_len, 3);
    /// assert_eq!(config.detail_debounce_ms, 150);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let aur_helper = match config.get("aur_helper").map(|s| s.trim()) {
            Some(helper) if is_valid_helper(helper) => helper.to_string(),
            Some(helper) => {
                tracing::warn!(aur_helper = %helper, "invalid aur_helper, using {DEFAULT_AUR_HELPER}");
                defaults.aur_helper
            }
            None => defaults.aur_helper,
        };

        let min_query_len = config
            .get("min_query_len")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.min_query_len);

        let detail_debounce_ms = config
            .get("detail_debounce_ms")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(defaults.detail_debounce_ms);

        Self {
            theme: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            aur_helper,
            min_query_len,
            detail_debounce_ms,
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// Dispatcher tunables.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            min_query_len: self.min_query_len,
            detail_debounce: Duration::from_millis(self.detail_debounce_ms),
        }
    }

    /// Backend settings.
    #[must_use]
    pub fn backend(&self) -> BackendConfig {
        BackendConfig {
            helper: self.aur_helper.clone(),
        }
    }

    /// Resolves the theme: `theme_file`, then `theme`, then the default.
    ///
    /// # Errors
    ///
    /// Returns [`ZacmanError::Theme`] for an unknown built-in name and the
    /// loader's error for an unreadable or invalid file.
    pub fn load_theme(&self) -> Result<Theme> {
        if let Some(file) = &self.theme_file {
            return Theme::from_file(infrastructure::expand_tilde(file));
        }
        match &self.theme {
            Some(name) => Theme::from_name(name).ok_or_else(|| {
                ZacmanError::Theme(format!("unknown theme '{name}' (available: {})", Theme::names().join(", ")))
            }),
            None => Ok(Theme::default()),
        }
    }
}

fn is_valid_helper(helper: &str) -> bool {
    !helper.is_empty() && helper.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Builds the initial state and theme from configuration.
///
/// A theme that fails to load is logged and replaced by the default; the
/// plugin never refuses to start over its colors.
///
/// ```rust
/// use zacman::{initialize, Config};
///
/// let config = Config {
///     theme: Some("no-such-theme".to_string()),
///     ..Default::default()
/// };
///
/// let (state, theme) = initialize(&config);
/// assert_eq!(theme, zacman::Theme::default());
/// assert_eq!(state.settings.min_query_len, 2);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> (AppState, Theme) {
    tracing::debug!("initializing zacman plugin");

    let theme = config.load_theme().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load theme, using default");
        Theme::default()
    });

    (AppState::new(config.settings()), theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn unsafe_helper_names_are_rejected() {
        for helper in ["paru; rm -rf ~", "$(id)", "", "yay bin"] {
            let config = Config::from_zellij(&map(&[("aur_helper", helper)]));
            assert_eq!(config.aur_helper, DEFAULT_AUR_HELPER, "{helper:?} was accepted");
        }
        let config = Config::from_zellij(&map(&[("aur_helper", "pikaur-2.0")]));
        assert_eq!(config.aur_helper, "pikaur-2.0");
    }

    #[test]
    fn zero_min_query_len_falls_back() {
        let config = Config::from_zellij(&map(&[("min_query_len", "0")]));
        assert_eq!(config.min_query_len, 2);
    }

    #[test]
    fn settings_carry_debounce() {
        let config = Config::from_zellij(&map(&[("detail_debounce_ms", "40")]));
        assert_eq!(config.settings().detail_debounce, Duration::from_millis(40));
        assert_eq!(config.backend().helper, "paru");
    }

    #[test]
    fn theme_file_takes_precedence() {
        let config = Config {
            theme: Some("basic".to_string()),
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Config::default()
        };
        assert!(matches!(config.load_theme(), Err(ZacmanError::Io(_))));

        let (_, theme) = initialize(&config);
        assert_eq!(theme, Theme::default());
    }

    #[test]
    fn named_theme_is_loaded() {
        let config = Config {
            theme: Some("Basic".to_string()),
            ..Config::default()
        };
        assert_eq!(config.load_theme().unwrap().colors.selection_bg, None);
        assert!(matches!(
            Config { theme: Some("nope".into()), ..Config::default() }.load_theme(),
            Err(ZacmanError::Theme(_))
        ));
    }
}
