//! Header component renderer.

use crate::ui::helpers::{centre_padding, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Appends the title centred across `cols`, bold, on the header background if
/// the theme defines one.
pub fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme, cols: usize) {
    let title = truncate(&header.title, cols);
    let (left, right) = centre_padding(title.chars().count(), cols);

    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }

    out.push_str(&" ".repeat(left));
    out.push_str(&title);
    out.push_str(&" ".repeat(right));

    out.push_str(Theme::reset());
    out.push('\n');
}
