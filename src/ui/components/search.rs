//! Search bar component renderer.
//!
//! A 3-line bordered box holding the query, or a dimmed placeholder when the
//! query is empty. The border takes the selection color while the input has
//! focus, and the active filter is shown at the right edge.

use crate::ui::helpers::{padding, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box.
const SEARCH_BOX_MARGIN: usize = 1;

/// Renders the search box at `row`. Returns `row + 3`.
///
/// ```text
/// ┌──────────────────────────────────────┐
/// │ > rip_                     [extra+aur] │
/// └──────────────────────────────────────┘
/// ```
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.is_focused {
        &theme.colors.selection_fg
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}┌{}┐{}", Theme::fg(border), "─".repeat(inner_width), Theme::reset());

    let filter = search
        .filter
        .as_ref()
        .map(|f| format!("[{f}] "))
        .unwrap_or_default();
    let text_width = inner_width.saturating_sub(filter.chars().count() + 3);

    let (text, style) = if search.query.is_empty() && !search.is_focused {
        (truncate(&search.placeholder, text_width), Theme::fg(&theme.colors.text_dim))
    } else {
        let cursor = if search.is_focused { "_" } else { "" };
        (
            truncate(&format!("{}{cursor}", search.query), text_width),
            Theme::fg(&theme.colors.text_normal),
        )
    };

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}│{}", Theme::fg(border), Theme::reset());
    print!("{} > {style}{text}{}", Theme::fg(border), padding(&text, text_width));
    print!("{}{filter}", Theme::fg(&theme.colors.warning));
    print!("{}│{}", Theme::fg(border), Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}└{}┘{}", Theme::fg(border), "─".repeat(inner_width), Theme::reset());

    row + 3
}
