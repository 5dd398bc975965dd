//! Browse modes and input focus.
//!
//! The browse mode decides what the main list shows and how keys are read when
//! no modal and no text input has focus:
//!
//! - **Install**: catalog plus AUR search results
//! - **Dashboard**: system overview
//! - **Remove**: installed packages
//! - **Update**: pending upgrades

/// The view the user is browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowseMode {
    #[default]
    Install,
    Dashboard,
    Remove,
    Update,
}

impl BrowseMode {
    pub const ALL: [Self; 4] = [Self::Install, Self::Dashboard, Self::Remove, Self::Update];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Install => "Install",
            Self::Dashboard => "Dashboard",
            Self::Remove => "Remove",
            Self::Update => "Update",
        }
    }

    /// Key that switches to this mode from the list.
    #[must_use]
    pub const fn hotkey(self) -> char {
        match self {
            Self::Install => 'i',
            Self::Dashboard => 'n',
            Self::Remove => 'r',
            Self::Update => 'u',
        }
    }

    #[must_use]
    pub fn from_hotkey(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.hotkey() == key)
    }

    /// Whether the mode shows a searchable package list.
    #[must_use]
    pub const fn has_list(self) -> bool {
        matches!(self, Self::Install | Self::Remove)
    }
}

/// Which part of the screen receives keys when no modal is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Single-key commands and list navigation.
    #[default]
    List,
    /// Keys edit the query; arrows still navigate.
    SearchInput,
    /// The overlay listing marked packages.
    SelectionPanel,
}
