//! Navigation bar: the seven sections with their hotkeys.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::NavItem;

pub fn render(items: &[NavItem], theme: &Theme, row: usize) -> String {
    let colors = &theme.colors;
    let mut out = position_cursor(row, 1);

    for item in items {
        if item.active {
            out.push_str(&Theme::fg(&colors.nav_active_fg));
            out.push_str(&Theme::bg(&colors.nav_active_bg));
            out.push_str(Theme::bold());
        } else {
            out.push_str(&Theme::fg(&colors.nav_fg));
        }
        out.push_str(&format!(" {} {} ", item.hotkey, item.title));
        out.push_str(Theme::reset());
        out.push(' ');
    }
    out
}
