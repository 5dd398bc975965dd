//! Detail pane renderer.

use crate::ui::helpers::{padding, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

/// Renders the detail pane in the column starting at `col`, between `top`
/// and `bottom` (exclusive).
///
/// `Key : value` lines print the key in the label color.
pub fn render_detail(top: usize, bottom: usize, col: usize, detail: &DetailInfo, theme: &Theme, width: usize) {
    let inner = width.saturating_sub(2);
    let lines: Vec<(String, String)> = match detail {
        DetailInfo::Hidden => Vec::new(),
        DetailInfo::Loading(name) => vec![(Theme::fg(&theme.colors.text_dim), format!("Loading {name}..."))],
        DetailInfo::Failed(message) => vec![(Theme::fg(&theme.colors.error), message.clone())],
        DetailInfo::Text(text) => text
            .iter()
            .map(|line| (Theme::fg(&theme.colors.text_normal), line.clone()))
            .collect(),
    };

    let mut lines = lines.into_iter();
    for row in top..bottom {
        position_cursor(row, col);
        print!("{}│{} ", Theme::fg(&theme.colors.border), Theme::reset());

        let Some((style, line)) = lines.next() else {
            print!("{}", " ".repeat(inner));
            continue;
        };

        let shown = truncate(&line, inner);
        match shown.split_once(':') {
            Some((key, value)) if matches!(detail, DetailInfo::Text(_)) && !key.starts_with(' ') => {
                print!("{}{key}:{}{value}", Theme::fg(&theme.colors.dashboard_label), style);
            }
            _ => print!("{style}{shown}"),
        }
        print!("{}{}", padding(&shown, inner), Theme::reset());
    }
}
