//! Shared rendering utilities.
//!
//! Everything here appends to a `String` buffer; the presenter writes the
//! finished buffer in one go. Widths are counted in characters, not bytes.

use crate::ui::theme::Theme;

/// Appends `text` with the given character ranges highlighted.
///
/// Ranges are `(start, end)` character indices, end exclusive, sorted and
/// non-overlapping. Out-of-bounds ends are clamped.
pub fn render_highlighted_text(out: &mut String, text: &str, ranges: &[(usize, usize)], theme: &Theme) {
    if ranges.is_empty() {
        out.push_str(text);
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

        out.extend(&chars[current_pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}

/// Shortens `text` to at most `max` characters, ending in `…` when cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut shortened: String = text.chars().take(max - 1).collect();
    shortened.push('…');
    shortened
}

/// Left and right padding that centres `len` characters in `cols`.
#[must_use]
pub const fn centre_padding(len: usize, cols: usize) -> (usize, usize) {
    let left = cols.saturating_sub(len) / 2;
    (left, cols.saturating_sub(left + len))
}

/// `1234567` → `"1,234,567"`.
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Appends a full-width horizontal rule.
pub fn render_border(out: &mut String, theme: &Theme, cols: usize) {
    out.push_str(&Theme::fg(&theme.colors.border));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_get_thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(4_567_890), "4,567,890");
    }

    #[test]
    fn truncation_respects_characters() {
        assert_eq!(truncate("Amélie", 10), "Amélie");
        assert_eq!(truncate("The Lord of the Rings", 8), "The Lor…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn centring_splits_leftover_space() {
        assert_eq!(centre_padding(4, 10), (3, 3));
        assert_eq!(centre_padding(5, 10), (2, 3));
        assert_eq!(centre_padding(20, 10), (0, 0));
    }

    #[test]
    fn highlights_wrap_only_matched_characters() {
        let theme = Theme::default();
        let mut out = String::new();
        render_highlighted_text(&mut out, "batman", &[(0, 3)], &theme);

        let highlight = Theme::bg(&theme.colors.match_highlight_bg);
        let start = out.find(&highlight).unwrap();
        assert!(out[start..].contains("bat"));
        assert!(out.ends_with("man"));
    }

    #[test]
    fn highlight_ranges_beyond_text_are_clamped() {
        let theme = Theme::default();
        let mut out = String::new();
        render_highlighted_text(&mut out, "up", &[(1, 9)], &theme);
        assert!(out.starts_with('u'));
        assert!(out.contains('p'));
    }
}
