//! Empty state component renderer.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered two-line message at `row` in a region `width` wide,
/// e.g. "No packages found" with a dimmed hint under it.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, width: usize) {
    let message = truncate(&empty.message, width);
    let msg_padding = width.saturating_sub(message.chars().count()) / 2;

    position_cursor(row, 1);
    print!("{}", " ".repeat(msg_padding));
    print!("{}{message}{}", Theme::fg(&theme.colors.text_normal), Theme::reset());

    if empty.subtitle.is_empty() {
        return;
    }

    let subtitle = truncate(&empty.subtitle, width);
    let sub_padding = width.saturating_sub(subtitle.chars().count()) / 2;

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(sub_padding));
    print!("{}{}{subtitle}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim), Theme::reset());
}
