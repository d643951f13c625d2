//! Composable UI component renderers.
//!
//! Each component appends ANSI-styled lines to a `String`. The layout
//! functions here put components together into the screens the presenter
//! shows.
//!
//! # Components
//!
//! - [`header`]: Centred title bar
//! - [`table`]: Numbered result list
//! - [`history`]: Recent searches with fuzzy highlights
//! - [`detail`]: Title detail card
//! - [`empty`]: Message shown when there is nothing to list
//! - [`footer`]: Command hints
//!
//! # Layouts
//!
//! ```text
//! render_results_screen      render_detail_screen
//! ┌──────────────────┐       ┌──────────────────┐
//! │ Header           │       │ Border           │
//! │ Border           │       │ Detail card      │
//! │ Summary          │       │ Border           │
//! │ Table / Empty    │       │ Footer           │
//! │ Status line      │       └──────────────────┘
//! │ Border           │
//! │ Footer           │
//! └──────────────────┘
//! ```

mod detail;
mod empty;
mod footer;
mod header;
mod history;
mod table;

pub use detail::render_detail;
pub use empty::render_empty_state;
pub use history::render_history;

use crate::ui::helpers::render_border;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailView, FooterInfo, ResultsView};

use footer::render_footer;
use header::render_header;
use table::{render_table_headers, render_table_rows};

const DETAIL_FOOTER: &str = ":back to results · :open N another title · :help";

pub fn render_results_screen(out: &mut String, vm: &ResultsView, theme: &Theme, cols: usize) {
    render_header(out, &vm.header, theme, cols);
    render_border(out, theme, cols);

    if let Some(summary) = &vm.summary {
        out.push_str(Theme::bold());
        out.push_str(&Theme::fg(&theme.colors.success_fg));
        out.push_str(summary);
        out.push_str(Theme::reset());
        out.push('\n');
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(out, empty, theme, cols);
    } else if !vm.display_items.is_empty() {
        render_table_headers(out, theme, cols);
        render_table_rows(out, &vm.display_items, theme, cols);
    }

    if let Some(status) = &vm.status_line {
        out.push_str(Theme::dim());
        out.push_str(&Theme::fg(&theme.colors.info_fg));
        out.push_str(status);
        out.push_str(Theme::reset());
        out.push('\n');
    }

    render_border(out, theme, cols);
    render_footer(out, &vm.footer, theme, cols);
}

pub fn render_detail_screen(out: &mut String, vm: &DetailView, theme: &Theme, cols: usize) {
    render_border(out, theme, cols);
    render_detail(out, vm, theme, cols);
    render_border(out, theme, cols);
    render_footer(
        out,
        &FooterInfo {
            keybindings: DETAIL_FOOTER.to_string(),
        },
        theme,
        cols,
    );
}
