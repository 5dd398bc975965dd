//! Status line and footer help bar.

use crate::app::{StatusLevel, StatusLine};
use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the status message, colored by level. Returns the next row.
pub fn render_status(row: usize, status: Option<&StatusLine>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let Some(status) = status else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let color = match status.level {
        StatusLevel::Info => &theme.colors.text_normal,
        StatusLevel::Success => &theme.colors.success,
        StatusLevel::Error => &theme.colors.error,
    };
    let text = truncate(&format!(" {}", status.text), cols);
    print!("{}{text}{}", Theme::fg(color), Theme::reset());
    print!("{}", " ".repeat(cols.saturating_sub(text.chars().count())));
    row + 1
}

/// Renders the centered keybinding hints. Returns the next row.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = truncate(&footer.keybindings, cols);

    let text_len = help_text.chars().count();
    let padding = (cols.saturating_sub(text_len)) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{help_text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}
