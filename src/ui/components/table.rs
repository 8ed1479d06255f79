//! The section table: column headers plus the windowed, filtered rows.

use crate::ui::helpers::{fit, position_cursor, render_highlighted_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::TableView;

/// Renders the table starting at `row`. The caller guarantees the view's rows
/// already fit the vertical space; horizontal space is split evenly between
/// the columns.
pub fn render(table: &TableView, theme: &Theme, row: usize, cols: usize) -> String {
    let colors = &theme.colors;
    let column_width = cols.saturating_sub(2) / table.columns.len().max(1);
    let mut out = String::new();

    out.push_str(&position_cursor(row, 2));
    out.push_str(&Theme::fg(&colors.text_dim));
    out.push_str(Theme::bold());
    for title in &table.columns {
        out.push_str(&fit(title, column_width));
    }
    out.push_str(Theme::reset());

    for (offset, table_row) in table.rows.iter().enumerate() {
        out.push_str(&position_cursor(row + 1 + offset, 2));

        let base_style = if table_row.is_selected {
            format!(
                "{}{}{}",
                Theme::fg(&colors.selection_fg),
                Theme::bg(&colors.selection_bg),
                Theme::bold()
            )
        } else {
            Theme::fg(&colors.text_normal)
        };
        let highlight_style = format!(
            "{}{}",
            Theme::fg(&colors.match_highlight_fg),
            Theme::bg(&colors.match_highlight_bg)
        );

        for (idx, cell) in table_row.cells.iter().enumerate() {
            let clipped = fit(cell, column_width);
            // Filter matches are highlighted in the first column only.
            if idx == 0 && !table_row.highlight_ranges.is_empty() {
                out.push_str(&render_highlighted_text(
                    &clipped,
                    &table_row.highlight_ranges,
                    &base_style,
                    &highlight_style,
                ));
            } else {
                out.push_str(&base_style);
                out.push_str(&clipped);
            }
        }
        out.push_str(Theme::reset());
    }

    out
}
