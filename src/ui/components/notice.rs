//! Placeholder and error notices replacing or accompanying the table.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;

/// A notice in the content slot (empty collections, access notes).
pub fn render_placeholder(text: &str, theme: &Theme, row: usize) -> String {
    format!(
        "{}{}  {}{}",
        position_cursor(row, 1),
        Theme::fg(&theme.colors.placeholder_fg),
        text,
        Theme::reset()
    )
}

/// A message in the red error slot.
pub fn render_error(text: &str, theme: &Theme, row: usize) -> String {
    format!(
        "{}{}{}  {}{}",
        position_cursor(row, 1),
        Theme::fg(&theme.colors.error_fg),
        Theme::bold(),
        text,
        Theme::reset()
    )
}
