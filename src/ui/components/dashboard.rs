//! Dashboard and updates views.

use crate::ui::helpers::{padding, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DashboardInfo, UpdatesInfo};

/// Column where dashboard values start.
const VALUE_COL: usize = 24;

/// Renders the statistics table, the biggest packages and the key hints.
pub fn render_dashboard(row: usize, bottom: usize, info: &DashboardInfo, theme: &Theme, cols: usize) {
    let mut current_row = row + 1;

    if info.rows.is_empty() {
        let message = if info.loading {
            "Loading statistics..."
        } else {
            "No statistics available (Ctrl+r to retry)"
        };
        position_cursor(current_row, 3);
        print!("{}{message}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
        return;
    }

    for (label, value, warn) in &info.rows {
        if current_row >= bottom {
            return;
        }
        position_cursor(current_row, 3);
        let value_color = if *warn {
            &theme.colors.dashboard_warning
        } else {
            &theme.colors.dashboard_value
        };
        print!("{}{label}{}", Theme::fg(&theme.colors.dashboard_label), padding(label, VALUE_COL));
        print!("{}{}{value}{}", Theme::bold(), Theme::fg(value_color), Theme::reset());
        current_row += 1;
    }

    if !info.top_packages.is_empty() && current_row + 2 < bottom {
        current_row += 1;
        position_cursor(current_row, 3);
        print!("{}Biggest packages{}", Theme::fg(&theme.colors.title_fg), Theme::reset());
        current_row += 1;

        for (name, size) in &info.top_packages {
            if current_row >= bottom {
                return;
            }
            position_cursor(current_row, 5);
            let name = truncate(name, VALUE_COL.saturating_sub(3));
            print!("{}{name}{}", Theme::fg(&theme.colors.dashboard_desc), padding(&name, VALUE_COL - 2));
            print!("{}{size}{}", Theme::fg(&theme.colors.dashboard_value), Theme::reset());
            current_row += 1;
        }
    }

    current_row += 1;
    for hint in &info.hints {
        if current_row >= bottom {
            return;
        }
        position_cursor(current_row, 3);
        print!("{}{}{}", Theme::fg(&theme.colors.text_dim), truncate(hint, cols.saturating_sub(4)), Theme::reset());
        current_row += 1;
    }
}

/// Renders the pending update list.
pub fn render_updates(row: usize, bottom: usize, info: &UpdatesInfo, theme: &Theme, cols: usize) {
    position_cursor(row + 1, 3);
    if info.loading {
        print!("{}Checking for updates...{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
        return;
    }
    if info.lines.is_empty() {
        print!("{}No pending updates{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
        return;
    }

    print!(
        "{}{}{} update(s) available{}",
        Theme::bold(),
        Theme::fg(&theme.colors.mode_update),
        info.lines.len(),
        Theme::reset()
    );

    for (offset, line) in info.lines.iter().enumerate() {
        let current_row = row + 3 + offset;
        if current_row >= bottom {
            break;
        }
        position_cursor(current_row, 5);
        print!("{}{}{}", Theme::fg(&theme.colors.text_normal), truncate(line, cols.saturating_sub(6)), Theme::reset());
    }
}
