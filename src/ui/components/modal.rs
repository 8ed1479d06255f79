//! The modal overlay: a centered box with form fields or a confirmation.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ModalBodyView, ModalView};

const MIN_WIDTH: usize = 44;
const MAX_WIDTH: usize = 72;

/// Renders the modal centered within the terminal. Drawn last so it covers
/// whatever the section rendered underneath.
pub fn render(modal: &ModalView, theme: &Theme, rows: usize, cols: usize) -> String {
    let colors = &theme.colors;

    let body_lines = match &modal.body {
        ModalBodyView::Form { fields } => fields.len(),
        ModalBodyView::Confirm { .. } => 1,
    };
    // title + blank + body + blank + status line, plus the borders
    let height = (body_lines + 5).min(rows.saturating_sub(2)).max(3);
    let width = content_width(modal)
        .clamp(MIN_WIDTH, MAX_WIDTH)
        .min(cols.saturating_sub(4));
    let top = rows.saturating_sub(height) / 2 + 1;
    let left = cols.saturating_sub(width + 2) / 2 + 1;

    let border = Theme::fg(&colors.modal_border);
    let mut out = String::new();

    out.push_str(&position_cursor(top, left));
    out.push_str(&border);
    out.push('┌');
    out.push_str(&"─".repeat(width));
    out.push('┐');

    for line in 1..height.saturating_sub(1) {
        out.push_str(&position_cursor(top + line, left));
        out.push_str(&border);
        out.push('│');
        out.push_str(&" ".repeat(width));
        out.push_str(&border);
        out.push('│');
    }

    out.push_str(&position_cursor(top + height - 1, left));
    out.push_str(&border);
    out.push('└');
    out.push_str(&"─".repeat(width));
    out.push('┘');

    out.push_str(&position_cursor(top + 1, left + 2));
    out.push_str(&Theme::fg(&colors.title_fg));
    out.push_str(Theme::bold());
    out.push_str(&fit(&modal.title, width.saturating_sub(3)));
    out.push_str(Theme::reset());

    match &modal.body {
        ModalBodyView::Form { fields } => {
            let label_width = fields
                .iter()
                .map(|f| f.label.chars().count())
                .max()
                .unwrap_or(0);
            for (idx, field) in fields.iter().enumerate() {
                out.push_str(&position_cursor(top + 3 + idx, left + 2));
                if field.focused {
                    out.push_str(&Theme::fg(&colors.nav_active_bg));
                    out.push_str("▶ ");
                } else {
                    out.push_str("  ");
                }
                out.push_str(&Theme::fg(&colors.text_dim));
                out.push_str(&fit(field.label, label_width));
                out.push_str("  ");
                out.push_str(&Theme::fg(&colors.text_normal));
                if field.focused {
                    out.push_str(Theme::bold());
                }
                let value_width = width.saturating_sub(label_width + 9);
                if field.is_select {
                    out.push_str(&format!("◂ {} ▸", fit(&field.value, value_width)));
                } else {
                    out.push_str(&fit(&field.value, value_width));
                }
                out.push_str(Theme::reset());
            }
        }
        ModalBodyView::Confirm { message } => {
            out.push_str(&position_cursor(top + 3, left + 2));
            out.push_str(&Theme::fg(&colors.text_normal));
            out.push_str(&fit(message, width.saturating_sub(3)));
            out.push_str(Theme::reset());
        }
    }

    let status_row = top + height - 2;
    if let Some(error) = &modal.error {
        out.push_str(&position_cursor(status_row, left + 2));
        out.push_str(&Theme::fg(&colors.error_fg));
        out.push_str(&fit(error, width.saturating_sub(3)));
        out.push_str(Theme::reset());
    } else if modal.saving {
        out.push_str(&position_cursor(status_row, left + 2));
        out.push_str(&Theme::fg(&colors.text_dim));
        out.push_str("Сохранение…");
        out.push_str(Theme::reset());
    }

    out
}

fn content_width(modal: &ModalView) -> usize {
    let title = modal.title.chars().count();
    let body = match &modal.body {
        ModalBodyView::Form { fields } => fields
            .iter()
            .map(|f| f.label.chars().count() + f.value.chars().count() + 9)
            .max()
            .unwrap_or(0),
        ModalBodyView::Confirm { message } => message.chars().count() + 4,
    };
    title.max(body) + 4
}
