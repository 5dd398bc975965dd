//! Top-level rendering coordinator.
//!
//! Rendering is two steps: the application state is turned into a
//! [`UIViewModel`], then the components print it.
//!
//! ```no_run
//! use zacman::app::AppState;
//! use zacman::ui::{render, Theme};
//!
//! let state = AppState::default();
//! render(&state, &Theme::default(), 24, 80); // prints to stdout
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout for a pane of `rows` x `cols`.
pub fn render(state: &AppState, theme: &Theme, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, theme, rows, cols);
}

/// Renders a precomputed view model.
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    components::render_frame(vm, theme, rows, cols);
}
