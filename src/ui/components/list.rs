//! Package list renderer.
//!
//! One row per package: mark box, highlighted `source/name`, version and an
//! installed badge. The row under the cursor gets the selection style.

use crate::ui::helpers::{self, padding, position_cursor, row_style, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Width of the `[x] ` mark column.
const MARK_WIDTH: usize = 4;

/// Width reserved for the installed badge.
const BADGE: &str = " [installed]";

/// Renders `items` from `row` downward, `width` columns wide.
/// Returns the row after the last item.
pub fn render_list(row: usize, items: &[DisplayItem], theme: &Theme, width: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_row(current_row, item, theme, width);
    }
    current_row
}

fn render_row(row: usize, item: &DisplayItem, theme: &Theme, width: usize) -> usize {
    position_cursor(row, 1);

    let base = row_style(theme, item.is_selected);
    print!("{base}");

    let mark = if item.is_marked { "[x] " } else { "[ ] " };
    if item.is_marked {
        print!("{}{mark}{base}", Theme::fg(&theme.colors.success));
    } else {
        print!("{mark}");
    }

    let badge = if item.is_installed { BADGE } else { "" };
    let name_width = width.saturating_sub(MARK_WIDTH + item.version.chars().count() + badge.len() + 1);

    let full_name = item.display_name();
    let shown = truncate(&full_name, name_width);
    let source_len = item.source.to_string().chars().count();

    // Color the repo prefix separately unless the row is selected.
    if item.is_selected || shown.chars().count() <= source_len {
        helpers::render_highlighted_text(&shown, &item.highlight_ranges, theme, &base);
    } else {
        let prefix: String = shown.chars().take(source_len).collect();
        let rest: String = shown.chars().skip(source_len).collect();
        let ranges = ranges_within(&item.highlight_ranges, 0, source_len);
        print!("{}", Theme::fg(theme.source_color(&item.source)));
        helpers::render_highlighted_text(&prefix, &ranges, theme, &Theme::fg(theme.source_color(&item.source)));
        print!("{base}");
        let ranges = ranges_within(&item.highlight_ranges, source_len, usize::MAX);
        helpers::render_highlighted_text(&rest, &ranges, theme, &base);
    }

    print!("{} ", padding(&shown, name_width));
    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", item.version);
    if item.is_installed {
        print!("{}{BADGE}", Theme::fg(&theme.colors.success));
    }

    let used = MARK_WIDTH + name_width + 1 + item.version.chars().count() + badge.len();
    print!("{base}{}", " ".repeat(width.saturating_sub(used)));
    print!("{}", Theme::reset());
    row + 1
}

/// Clips highlight ranges to `[from, to)` and shifts them to start at `from`.
fn ranges_within(ranges: &[(usize, usize)], from: usize, to: usize) -> Vec<(usize, usize)> {
    ranges
        .iter()
        .filter_map(|&(start, end)| {
            let start = start.max(from);
            let end = end.min(to);
            (start < end).then(|| (start - from, end - from))
        })
        .collect()
}
