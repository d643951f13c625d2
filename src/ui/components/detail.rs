//! Title detail renderer.

use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailView;

const LABEL_WIDTH: usize = 12;

/// Appends the detail card: title, subtitle, genres, plot, labelled facts
/// and ratings.
pub fn render_detail(out: &mut String, detail: &DetailView, theme: &Theme, cols: usize) {
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&truncate(&detail.title, cols));
    out.push_str(Theme::reset());
    out.push('\n');

    if !detail.subtitle.is_empty() {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(&detail.subtitle);
        out.push_str(Theme::reset());
        out.push('\n');
    }

    if !detail.genres.is_empty() {
        out.push_str(&Theme::fg(&theme.colors.accent));
        out.push_str(&detail.genres.join(" · "));
        out.push_str(Theme::reset());
        out.push('\n');
    }

    if let Some(plot) = &detail.plot {
        out.push('\n');
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        for line in wrap(plot, cols.max(20)) {
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str(Theme::reset());
    }

    if !detail.fields.is_empty() {
        out.push('\n');
    }
    for (label, value) in &detail.fields {
        render_field(out, label, value, &theme.colors.text_normal, theme);
    }

    if !detail.ratings.is_empty() {
        out.push('\n');
        for (source, value) in &detail.ratings {
            render_field(out, source, value, &theme.colors.rating_fg, theme);
        }
    }
}

fn render_field(out: &mut String, label: &str, value: &str, value_colour: &str, theme: &Theme) {
    out.push_str(&Theme::fg(&theme.colors.accent));
    out.push_str(&format!("{:<LABEL_WIDTH$}", truncate(label, LABEL_WIDTH - 1)));
    out.push_str(&Theme::fg(value_colour));
    out.push_str(value);
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Greedy word wrap at `width` characters.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let needed = if line.is_empty() { 0 } else { 1 } + word.chars().count();
        if !line.is_empty() && line.chars().count() + needed > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
