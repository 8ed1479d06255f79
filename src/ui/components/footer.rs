//! Bottom keybinding hints.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

pub fn render(footer: &FooterInfo, theme: &Theme, row: usize, cols: usize) -> String {
    format!(
        "{}{}{}{}{}",
        position_cursor(row, 1),
        Theme::fg(&theme.colors.text_dim),
        Theme::dim(),
        fit(&footer.keybindings, cols),
        Theme::reset()
    )
}
