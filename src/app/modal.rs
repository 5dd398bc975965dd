//! Confirmation dialog and error overlay.
//!
//! While a modal is open it receives every key except `Ctrl+C`. Each key maps
//! to exactly one outcome, so the dispatcher never has to guess what a modal
//! did with its input.

use super::actions::ActionKind;
use super::handler::Key;

/// Rows of the target list visible in the confirmation dialog.
pub const CONFIRM_VISIBLE_ROWS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub kind: ActionKind,
    /// Package names handed to the operation. Empty for whole-system operations.
    pub targets: Vec<String>,
    /// Lines listed in the dialog body.
    pub lines: Vec<String>,
    pub scroll_offset: usize,
}

impl Confirmation {
    /// A dialog whose body lists the targets themselves.
    #[must_use]
    pub fn for_targets(kind: ActionKind, targets: Vec<String>) -> Self {
        Self {
            kind,
            lines: targets.clone(),
            targets,
            scroll_offset: 0,
        }
    }

    /// A dialog with a custom body, e.g. the update list.
    #[must_use]
    pub const fn with_lines(kind: ActionKind, targets: Vec<String>, lines: Vec<String>) -> Self {
        Self {
            kind,
            targets,
            lines,
            scroll_offset: 0,
        }
    }

    const fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(CONFIRM_VISIBLE_ROWS)
    }

    fn scroll_down(&mut self) {
        self.scroll_offset = (self.scroll_offset + 1).min(self.max_offset());
    }

    fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorOverlay {
    pub title: String,
    pub message: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    None,
    Confirmation(Confirmation),
    ErrorOverlay(ErrorOverlay),
}

/// What a key did to the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalOutcome {
    /// Confirmation accepted; the modal is closed.
    Confirmed { kind: ActionKind, targets: Vec<String> },
    /// Confirmation rejected; the modal is closed.
    Cancelled,
    /// Error overlay closed.
    Dismissed,
    /// Dialog body scrolled (possibly clamped to the same offset).
    Scrolled,
    /// Key has no meaning here; the modal stays open.
    Ignored,
}

impl ModalState {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Routes one key to the open modal.
    ///
    /// Returns `None` when no modal is open.
    pub fn handle_key(&mut self, key: &Key) -> Option<ModalOutcome> {
        let outcome = match self {
            Self::None => return None,
            Self::Confirmation(dialog) => match key {
                Key::Char('y' | 'Y') | Key::Enter => ModalOutcome::Confirmed {
                    kind: dialog.kind,
                    targets: std::mem::take(&mut dialog.targets),
                },
                Key::Char('n' | 'N') | Key::Esc => ModalOutcome::Cancelled,
                Key::Char('j') | Key::Down => {
                    dialog.scroll_down();
                    ModalOutcome::Scrolled
                }
                Key::Char('k') | Key::Up => {
                    dialog.scroll_up();
                    ModalOutcome::Scrolled
                }
                _ => ModalOutcome::Ignored,
            },
            Self::ErrorOverlay(_) => match key {
                Key::Esc | Key::Enter | Key::Char('q') => ModalOutcome::Dismissed,
                _ => ModalOutcome::Ignored,
            },
        };

        if matches!(
            outcome,
            ModalOutcome::Confirmed { .. } | ModalOutcome::Cancelled | ModalOutcome::Dismissed
        ) {
            *self = Self::None;
        }

        Some(outcome)
    }
}
