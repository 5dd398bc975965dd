//! Shared rendering utilities.
//!
//! Low-level helpers used by several components: cursor positioning, width
//! fitting and fuzzy match highlighting. All widths are counted in characters,
//! never bytes, so package descriptions with multibyte text line up.

use crate::ui::theme::Theme;

/// Moves the cursor to `row`, `col` (both 1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Cuts `text` to at most `width` characters, marking the cut with `…`.
///
/// # Examples
///
/// ```
/// use zacman::ui::helpers::truncate;
///
/// assert_eq!(truncate("ripgrep", 10), "ripgrep");
/// assert_eq!(truncate("ripgrep-all", 8), "ripgrep…");
/// assert_eq!(truncate("abc", 0), "");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Spaces needed to pad `text` out to `width` characters.
#[must_use]
pub fn padding(text: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(text.chars().count()))
}

/// Prints `text` with the given character ranges in the match color.
///
/// Ranges are `(start, end)` character indices, end exclusive, sorted and
/// non-overlapping. After each highlighted run the base style is restored:
/// `restore` is printed so selected rows keep their selection colors.
///
/// ```text
/// render_highlighted_text("extra/ripgrep", &[(6, 9)], &theme, &base);
/// // "extra/" normal, "rip" highlighted, "grep" normal
/// ```
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, restore: &str) {
    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        if start > current_pos {
            let normal_section: String = chars[current_pos..start].iter().collect();
            print!("{normal_section}");
        }

        print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.match_highlight_fg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}{restore}", Theme::reset());

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Base style for a list row: selection colors when under the cursor.
#[must_use]
pub fn row_style(theme: &Theme, is_selected: bool) -> String {
    if is_selected {
        let mut style = Theme::fg(&theme.colors.selection_fg);
        match &theme.colors.selection_bg {
            Some(bg) => style.push_str(&Theme::bg(bg)),
            None => style.push_str(Theme::reverse()),
        }
        style
    } else {
        Theme::fg(&theme.colors.text_normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("ñandú", 5), "ñandú");
        assert_eq!(truncate("ñandú-utils", 6), "ñandú…");
        assert_eq!(truncate("x", 1), "x");
    }

    #[test]
    fn padding_fills_to_width() {
        assert_eq!(padding("abc", 6), "   ");
        assert_eq!(padding("abcdef", 3), "");
    }

    #[test]
    fn selection_falls_back_to_reverse_video() {
        let basic = Theme::from_name("basic").unwrap();
        assert!(row_style(&basic, true).ends_with(Theme::reverse()));

        let mocha = Theme::default();
        assert!(!row_style(&mocha, true).contains(Theme::reverse()));
        assert_eq!(row_style(&mocha, false), Theme::fg(&mocha.colors.text_normal));
    }
}
