//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML files with a display name and a `[colors]` table of hex
//! strings. Two are compiled in; a custom file can be loaded at startup.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: dark theme with pastel accents (default)
//! - `basic`: plain 256-color palette for terminals without truecolor
//!
//! # TOML Format
//!
//! ```toml
//! name = "My Theme"
//!
//! [colors]
//! border = "#6c7086"
//! title_fg = "#f9e2af"
//! selection_fg = "#cba6f7"
//! selection_bg = "#313244"   # optional
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! match_highlight_fg = "#f9e2af"
//! mode_install = "#89b4fa"
//! mode_dashboard = "#f5c2e7"
//! mode_remove = "#f38ba8"
//! mode_update = "#a6e3a1"
//! source_core = "#a6e3a1"
//! source_extra = "#89b4fa"
//! source_multilib = "#fab387"
//! source_aur = "#cba6f7"
//! success = "#a6e3a1"
//! warning = "#f9e2af"
//! error = "#f38ba8"
//! dashboard_label = "#cdd6f4"
//! dashboard_value = "#89dceb"
//! dashboard_warning = "#f38ba8"
//! dashboard_desc = "#a6adc8"
//! ```
//!
//! # Example
//!
//! ```rust
//! use zacman::ui::Theme;
//!
//! let theme = Theme::from_name("Catppuccin Mocha").unwrap();
//! print!("{}title{}", Theme::fg(&theme.colors.title_fg), Theme::reset());
//! ```

use crate::app::BrowseMode;
use crate::domain::{Result, Source, ZacmanError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const BUILTIN: [(&str, &str); 2] = [
    ("catppuccin-mocha", include_str!("../../themes/catppuccin-mocha.toml")),
    ("basic", include_str!("../../themes/basic.toml")),
];

/// Color scheme for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex color strings for every styled element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub border: String,
    pub title_fg: String,
    pub selection_fg: String,
    /// Row background under the cursor. Themes without it only recolor the text.
    #[serde(default)]
    pub selection_bg: Option<String>,
    pub text_normal: String,
    pub text_dim: String,
    pub match_highlight_fg: String,

    pub mode_install: String,
    pub mode_dashboard: String,
    pub mode_remove: String,
    pub mode_update: String,

    pub source_core: String,
    pub source_extra: String,
    pub source_multilib: String,
    pub source_aur: String,

    pub success: String,
    pub warning: String,
    pub error: String,

    pub dashboard_label: String,
    pub dashboard_value: String,
    pub dashboard_warning: String,
    pub dashboard_desc: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Matching ignores case and accepts the display name with spaces
    /// replaced by `-` or dropped, so `catppuccin-mocha`, `Catppuccin Mocha`
    /// and `catppuccinmocha` all resolve to the same theme.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize(name);
        BUILTIN
            .iter()
            .find(|(key, _)| normalize(key) == wanted)
            .and_then(|(_, toml_str)| toml::from_str(toml_str).ok())
    }

    /// Names of the built-in themes.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        BUILTIN.iter().map(|(key, _)| *key).collect()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ZacmanError::Io`] if the file cannot be read and
    /// [`ZacmanError::Theme`] if it is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| ZacmanError::Theme(format!("{}: {e}", path.display())))
    }

    /// Accent color for a browse mode tab.
    #[must_use]
    pub fn mode_color(&self, mode: BrowseMode) -> &str {
        match mode {
            BrowseMode::Install => &self.colors.mode_install,
            BrowseMode::Dashboard => &self.colors.mode_dashboard,
            BrowseMode::Remove => &self.colors.mode_remove,
            BrowseMode::Update => &self.colors.mode_update,
        }
    }

    /// Color of the `source/` prefix in list rows.
    #[must_use]
    pub fn source_color(&self, source: &Source) -> &str {
        match source {
            Source::Core => &self.colors.source_core,
            Source::Extra => &self.colors.source_extra,
            Source::Multilib => &self.colors.source_multilib,
            Source::Aur => &self.colors.source_aur,
            Source::Local | Source::Other(_) => &self.colors.text_dim,
        }
    }

    /// Parses "#RRGGBB" into RGB components. Malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return (255, 255, 255);
        }
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .unwrap_or(255)
        };
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// ANSI 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reverse() -> &'static str {
        "\u{001b}[7m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the compiled-in theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").expect("built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn every_builtin_theme_parses() {
        for name in Theme::names() {
            assert!(Theme::from_name(name).is_some(), "{name} failed to parse");
        }
    }

    #[test]
    fn name_lookup_is_forgiving() {
        for name in ["catppuccin-mocha", "Catppuccin Mocha", "catppuccinmocha", "CATPPUCCIN-MOCHA"] {
            assert_eq!(Theme::from_name(name).map(|t| t.name), Some("Catppuccin Mocha".to_string()));
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn basic_theme_has_no_selection_background() {
        let basic = Theme::from_name("basic").unwrap();
        assert!(basic.colors.selection_bg.is_none());
        assert!(Theme::default().colors.selection_bg.is_some());
    }

    #[test]
    fn hex_colors_become_truecolor_escapes() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("000000"), "\u{1b}[48;2;0;0;0m");
        assert_eq!(Theme::fg("nope"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn theme_file_round_trips_through_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let toml = toml::to_string(&Theme::default()).unwrap();
        file.write_all(toml.as_bytes()).unwrap();

        let loaded = Theme::from_file(file.path()).unwrap();
        assert_eq!(loaded, Theme::default());
    }

    #[test]
    fn invalid_theme_file_is_a_theme_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = 3").unwrap();
        assert!(matches!(Theme::from_file(file.path()), Err(ZacmanError::Theme(_))));
    }
}
