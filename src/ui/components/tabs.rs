//! Mode tab bar.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TabInfo;

/// Renders the tab bar, e.g. ` zacman  [i] Install  [n] Dashboard ...`.
///
/// The active tab is drawn bold in its mode color; the rest are dimmed.
/// Returns the next row.
pub fn render_tabs(row: usize, tabs: &[TabInfo], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}{} zacman {}", Theme::bold(), Theme::fg(&theme.colors.title_fg), Theme::reset());

    let mut used = " zacman ".len();
    for tab in tabs {
        let label = format!(" [{}] {} ", tab.hotkey, tab.label);
        let width = label.chars().count();
        if used + width > cols {
            break;
        }

        if tab.is_active {
            print!("{}{}", Theme::bold(), Theme::fg(theme.mode_color(tab.mode)));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{label}{}", Theme::reset());
        used += width;
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}
