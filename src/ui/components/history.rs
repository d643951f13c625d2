//! Recent searches list renderer.

use crate::ui::helpers::render_highlighted_text;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HistoryRow;

/// Appends one line per entry: number, query with filter matches
/// highlighted, and how long ago it ran.
pub fn render_history(out: &mut String, rows: &[HistoryRow], theme: &Theme) {
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str("Recent searches");
    out.push_str(Theme::reset());
    out.push('\n');

    for row in rows {
        out.push_str(&Theme::fg(&theme.colors.accent));
        out.push_str(&format!("{:>3}. ", row.position));
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        render_highlighted_text(out, &row.query, &row.highlight_ranges, theme);
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str("  ");
        out.push_str(&row.time_ago);
        out.push_str(Theme::reset());
        out.push('\n');
    }

    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(":recall N to search again · :clear to forget");
    out.push_str(Theme::reset());
    out.push('\n');
}
