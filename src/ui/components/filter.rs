//! The filter bar shown above the footer while filter mode is active.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterBarInfo;

pub fn render(filter: &FilterBarInfo, theme: &Theme, row: usize) -> String {
    let colors = &theme.colors;
    format!(
        "{}{}/ {}{}{}▌{}",
        position_cursor(row, 1),
        Theme::fg(&colors.filter_bar_border),
        Theme::fg(&colors.text_normal),
        filter.query,
        Theme::fg(&colors.filter_bar_border),
        Theme::reset()
    )
}
