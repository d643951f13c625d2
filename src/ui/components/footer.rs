//! Footer component renderer.

use crate::ui::helpers::{centre_padding, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Appends the command hints, dimmed and centred.
///
/// Hints wider than the terminal are cut so the line never wraps.
pub fn render_footer(out: &mut String, footer: &FooterInfo, theme: &Theme, cols: usize) {
    let hints = truncate(&footer.keybindings, cols);
    let (left, _) = centre_padding(hints.chars().count(), cols);

    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&" ".repeat(left));
    out.push_str(&hints);
    out.push_str(Theme::reset());
    out.push('\n');
}
