//! Composable UI component renderers.
//!
//! Each component prints one region of the frame with ANSI escapes and
//! returns the next free row where that makes sense.
//!
//! - [`tabs`]: mode tab bar
//! - [`search`]: search input box
//! - [`list`]: package rows
//! - [`detail`]: package detail column
//! - [`dashboard`]: statistics and pending updates
//! - [`footer`]: status line and keybinding hints
//! - [`empty`]: centered empty-state message
//! - [`overlay`]: dialogs and the marked-packages panel
//!
//! [`render_frame`] lays them out:
//!
//! ```text
//! [blank line]
//! [Tabs]
//! [Border]
//! [Search Bar - 3 lines]          (install and remove)
//! [List]              │ [Detail]  (detail only on wide panes)
//! [Border]
//! [Status]
//! [Footer]
//! ```

mod dashboard;
mod detail;
mod empty;
mod footer;
mod list;
mod overlay;
mod search;
mod tabs;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, BrowseInfo, UIViewModel};

/// Panes at least this wide get a detail column.
const DETAIL_MIN_COLS: usize = 90;

/// Renders a horizontal border line. Returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders a full frame.
pub fn render_frame(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2;

    current_row = tabs::render_tabs(current_row, &vm.tabs, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let footer_row = rows;
    let status_row = rows.saturating_sub(1);
    let border_row = rows.saturating_sub(2);

    match &vm.body {
        Body::Browse(browse) => render_browse(current_row, border_row, browse, theme, cols),
        Body::Dashboard(info) => dashboard::render_dashboard(current_row, border_row, info, theme, cols),
        Body::Updates(info) => dashboard::render_updates(current_row, border_row, info, theme, cols),
    }

    render_border(border_row, &theme.colors.border, cols);
    footer::render_status(status_row, vm.status.as_ref(), theme, cols);
    footer::render_footer(footer_row, &vm.footer, theme, cols);

    if let Some(panel) = &vm.selection_panel {
        overlay::render_selection_panel(current_row, panel, theme, cols);
    }
    if let Some(modal) = &vm.modal {
        overlay::render_modal(modal, theme, rows, cols);
    }
}

fn render_browse(row: usize, bottom: usize, browse: &BrowseInfo, theme: &Theme, cols: usize) {
    let list_top = search::render_search_bar(row, &browse.search_bar, theme, cols);

    let list_width = if cols >= DETAIL_MIN_COLS {
        cols * 55 / 100
    } else {
        cols
    };

    if let Some(empty) = &browse.empty_state {
        empty::render_empty_state(list_top + 2, empty, theme, list_width);
    } else {
        list::render_list(list_top, &browse.items, theme, list_width);
    }

    if list_width < cols {
        detail::render_detail(list_top, bottom, list_width + 1, &browse.detail, theme, cols - list_width);
    }
}
