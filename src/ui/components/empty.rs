//! Empty state component renderer.
//!
//! Shown instead of the result list before the first search and after a search
//! that produced nothing.

use crate::ui::helpers::centre_padding;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Appends a blank line, the centred message, then the dimmed subtitle.
pub fn render_empty_state(out: &mut String, empty: &EmptyState, theme: &Theme, cols: usize) {
    out.push('\n');

    let (msg_padding, _) = centre_padding(empty.message.chars().count(), cols);
    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    out.push_str(&" ".repeat(msg_padding));
    out.push_str(&empty.message);
    out.push_str(Theme::reset());
    out.push('\n');

    let (sub_padding, _) = centre_padding(empty.subtitle.chars().count(), cols);
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&" ".repeat(sub_padding));
    out.push_str(&empty.subtitle);
    out.push_str(Theme::reset());
    out.push_str("\n\n");
}
