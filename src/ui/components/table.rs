//! Result table renderer.
//!
//! Four columns: row number, title, year, type. The title column takes
//! whatever width the other three leave.

use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const NUMBER_WIDTH: usize = 5;
const YEAR_WIDTH: usize = 11;
const TYPE_WIDTH: usize = 8;
const MIN_TITLE_WIDTH: usize = 12;

fn title_width(cols: usize) -> usize {
    cols.saturating_sub(NUMBER_WIDTH + YEAR_WIDTH + TYPE_WIDTH)
        .max(MIN_TITLE_WIDTH)
}

pub fn render_table_headers(out: &mut String, theme: &Theme, cols: usize) {
    let width = title_width(cols);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&format!(
        "{:>n$} {:<width$}{:<YEAR_WIDTH$}{:<TYPE_WIDTH$}",
        "#",
        "TITLE",
        "YEAR",
        "TYPE",
        n = NUMBER_WIDTH - 1,
    ));
    out.push_str(Theme::reset());
    out.push('\n');
}

pub fn render_table_rows(out: &mut String, items: &[DisplayItem], theme: &Theme, cols: usize) {
    for item in items {
        render_table_row(out, item, theme, cols);
    }
}

fn render_table_row(out: &mut String, item: &DisplayItem, theme: &Theme, cols: usize) {
    let width = title_width(cols);
    // Keep one column of air between title and year.
    let title = truncate(&item.title, width.saturating_sub(1));
    let title_pad = width.saturating_sub(title.chars().count());

    out.push_str(&Theme::fg(&theme.colors.accent));
    out.push_str(&format!("{:>n$}.", item.position, n = NUMBER_WIDTH - 2));
    out.push(' ');

    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&title);
    out.push_str(&" ".repeat(title_pad));

    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&format!(
        "{:<YEAR_WIDTH$}{:<TYPE_WIDTH$}",
        truncate(&item.year, YEAR_WIDTH - 1),
        truncate(&item.media_type, TYPE_WIDTH)
    ));
    out.push_str(Theme::reset());
    out.push('\n');
}
