//! Path helpers for the Zellij sandbox.

use std::path::PathBuf;

/// Returns the plugin's data directory, `/host/.local/share/zellij/zacman`.
///
/// `/host` is the cwd of the last focused terminal (usually the home
/// directory), so on the host this is `~/.local/share/zellij/zacman`. The log
/// file lives here.
///
/// # Examples
///
/// ```
/// use zacman::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/zacman"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zacman")
}

/// Rewrites a leading `~` to the sandbox's `/host` mount, e.g. for `theme_file`.
///
/// # Examples
///
/// ```
/// use zacman::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/zacman.toml"), "/etc/zacman.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
