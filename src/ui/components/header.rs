//! Top header line: application title left, operator identity right.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

pub fn render(header: &HeaderInfo, theme: &Theme, cols: usize) -> String {
    let colors = &theme.colors;
    let identity = header.identity.as_deref().unwrap_or("");
    let identity_width = identity.chars().count();
    let title_width = cols.saturating_sub(identity_width + 1);

    let mut out = format!(
        "{}{}{}",
        position_cursor(1, 1),
        Theme::bold(),
        Theme::fg(&colors.header_fg)
    );
    if let Some(bg) = &colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }
    out.push_str(&fit(&header.title, title_width));
    out.push_str(&Theme::fg(&colors.text_dim));
    out.push_str(identity);
    out.push(' ');
    out.push_str(Theme::reset());
    out
}
