//! Floating boxes drawn over the body: the confirmation and error dialogs
//! and the marked-packages panel.

use crate::ui::helpers::{padding, position_cursor, row_style, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ModalInfo, SelectionPanelInfo};

const MODAL_MAX_WIDTH: usize = 64;
const PANEL_WIDTH: usize = 36;

/// One styled line inside a box.
struct BoxLine {
    style: String,
    text: String,
}

impl BoxLine {
    fn new(style: String, text: impl Into<String>) -> Self {
        Self { style, text: text.into() }
    }
}

/// Draws a bordered box with `title` in the top edge and `lines` inside.
fn render_box(top: usize, left: usize, width: usize, title: &str, border: &str, lines: &[BoxLine]) {
    let inner = width.saturating_sub(2);
    let title = truncate(&format!(" {title} "), inner);

    position_cursor(top, left);
    print!("{}{}┌{title}{}┐", Theme::bold(), Theme::fg(border), "─".repeat(inner.saturating_sub(title.chars().count())));
    print!("{}", Theme::reset());

    for (offset, line) in lines.iter().enumerate() {
        let text = truncate(&line.text, inner.saturating_sub(2));
        position_cursor(top + 1 + offset, left);
        print!("{}│{} ", Theme::fg(border), Theme::reset());
        print!("{}{text}{}", line.style, padding(&text, inner.saturating_sub(2)));
        print!("{} {}│{}", Theme::reset(), Theme::fg(border), Theme::reset());
    }

    position_cursor(top + 1 + lines.len(), left);
    print!("{}└{}┘{}", Theme::fg(border), "─".repeat(inner), Theme::reset());
}

/// Renders a confirmation or error dialog centered in the pane.
pub fn render_modal(modal: &ModalInfo, theme: &Theme, rows: usize, cols: usize) {
    let width = cols.saturating_sub(4).min(MODAL_MAX_WIDTH);
    let normal = Theme::fg(&theme.colors.text_normal);
    let dim = Theme::fg(&theme.colors.text_dim);

    let (title, border, lines) = match modal {
        ModalInfo::Confirmation { title, lines, above, below } => {
            let mut body = vec![BoxLine::new(String::new(), "")];
            if *above > 0 {
                body.push(BoxLine::new(dim.clone(), format!("  ↑ {above} more")));
            }
            body.extend(lines.iter().map(|l| BoxLine::new(normal.clone(), l.clone())));
            if *below > 0 {
                body.push(BoxLine::new(dim.clone(), format!("  ↓ {below} more")));
            }
            body.push(BoxLine::new(String::new(), ""));
            body.push(BoxLine::new(Theme::fg(&theme.colors.warning), "[y] yes  [n] no"));
            (title.as_str(), &theme.colors.warning, body)
        }
        ModalInfo::Error { title, message, detail } => {
            let mut body = vec![
                BoxLine::new(String::new(), ""),
                BoxLine::new(normal.clone(), message.clone()),
            ];
            if !detail.is_empty() {
                body.push(BoxLine::new(dim.clone(), detail.clone()));
            }
            body.push(BoxLine::new(String::new(), ""));
            body.push(BoxLine::new(dim, "[esc] dismiss"));
            (title.as_str(), &theme.colors.error, body)
        }
    };

    let height = lines.len() + 2;
    let top = rows.saturating_sub(height) / 2 + 1;
    let left = cols.saturating_sub(width) / 2 + 1;
    render_box(top, left, width, title, border, &lines);
}

/// Renders the marked-packages panel at the right edge, below the tabs.
pub fn render_selection_panel(top: usize, panel: &SelectionPanelInfo, theme: &Theme, cols: usize) {
    let width = PANEL_WIDTH.min(cols);
    let left = cols.saturating_sub(width) + 1;

    let mut lines: Vec<BoxLine> = panel
        .names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let is_selected = index == panel.cursor;
            let marker = if is_selected { "> " } else { "  " };
            BoxLine::new(row_style(theme, is_selected), format!("{marker}{name}"))
        })
        .collect();
    if panel.hidden > 0 {
        lines.push(BoxLine::new(Theme::fg(&theme.colors.text_dim), format!("  +{} more", panel.hidden)));
    }

    let title = format!("Marked ({})", panel.names.len() + panel.hidden);
    render_box(top, left, width, &title, &theme.colors.selection_fg, &lines);
}
