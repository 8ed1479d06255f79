//! Frame renderer.
//!
//! Composes the component fragments into one ANSI string per frame. The
//! layout is fixed: header, navigation, separator, section card, content,
//! then the error slot, optional filter bar and footer pinned to the bottom.
//! The modal overlay is appended last so it paints over the section.

use crate::app::state::AppState;
use crate::ui::components::{filter, footer, header, modal, nav, notice, table};
use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UiViewModel;

/// Renders the current state into a full frame.
#[must_use]
pub fn render(state: &AppState, rows: usize, cols: usize) -> String {
    let vm = state.compute_viewmodel(rows, cols);
    render_viewmodel(&vm, &state.theme, rows, cols)
}

/// Renders a precomputed view model.
#[must_use]
pub fn render_viewmodel(vm: &UiViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let colors = &theme.colors;
    let mut frame = String::from("\u{001b}[2J");

    frame.push_str(&header::render(&vm.header, theme, cols));
    frame.push_str(&nav::render(&vm.nav, theme, 2));

    frame.push_str(&position_cursor(3, 1));
    frame.push_str(&Theme::fg(&colors.border));
    frame.push_str(&"─".repeat(cols));
    frame.push_str(Theme::reset());

    frame.push_str(&position_cursor(4, 2));
    frame.push_str(&Theme::fg(&colors.title_fg));
    frame.push_str(Theme::bold());
    frame.push_str(&vm.card.title);
    frame.push_str(Theme::reset());
    if vm.card.loading {
        frame.push_str(&Theme::fg(&colors.text_dim));
        frame.push_str("загрузка…");
        frame.push_str(Theme::reset());
    }

    if let Some(hint) = &vm.card.add_hint {
        frame.push_str(&position_cursor(5, 2));
        frame.push_str(&Theme::fg(&colors.text_dim));
        frame.push_str(hint);
        frame.push_str(Theme::reset());
    }

    let mut content_row = 6;
    if let Some(selector) = &vm.selector {
        frame.push_str(&position_cursor(content_row, 2));
        frame.push_str(&Theme::fg(&colors.text_normal));
        match (&selector.current, selector.loaded) {
            (Some(current), _) => frame.push_str(&format!("Склад: ◂ {current} ▸")),
            (None, true) => frame.push_str("Склад: нет складов"),
            (None, false) => frame.push_str("Склад: …"),
        }
        frame.push_str(Theme::reset());
        content_row += 1;
    }

    if let Some(view) = &vm.table {
        frame.push_str(&table::render(view, theme, content_row, cols));
    } else if let Some(placeholder) = &vm.placeholder {
        frame.push_str(&notice::render_placeholder(placeholder, theme, content_row));
    }

    if let Some(error) = &vm.error {
        frame.push_str(&notice::render_error(error, theme, rows.saturating_sub(2)));
    }
    if let Some(bar) = &vm.filter_bar {
        frame.push_str(&filter::render(bar, theme, rows.saturating_sub(1)));
    }
    frame.push_str(&footer::render(&vm.footer, theme, rows, cols));

    if let Some(view) = &vm.modal {
        frame.push_str(&modal::render(view, theme, rows, cols));
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::AppState;
    use crate::domain::Record;
    use serde_json::json;

    #[test]
    fn frame_contains_the_visible_texts() {
        let mut state = AppState::new(Theme::default());
        state.section.set_rows(vec![
            Record::from_value(json!({"login": "ivanov", "fio": "Иванов"})).unwrap()
        ]);
        state.apply_row_filter();

        let frame = render(&state, 24, 100);
        assert!(frame.contains("SDS Console"));
        assert!(frame.contains("Пользователи (1)"));
        assert!(frame.contains("ivanov"));
        assert!(frame.contains("q: выход"));
    }

    #[test]
    fn placeholder_replaces_the_table() {
        let mut state = AppState::new(Theme::default());
        state.section.set_placeholder("Доступ только для администратора.");
        state.apply_row_filter();

        let frame = render(&state, 24, 100);
        assert!(frame.contains("Доступ только для администратора."));
        assert!(!frame.contains("Логин"));
    }

    #[test]
    fn modal_overlay_is_rendered_last() {
        let mut state = AppState::new(Theme::default());
        state.modal = Some(crate::sections::users::create_modal(1));

        let frame = render(&state, 30, 100);
        let modal_at = frame.find("Добавить пользователя").unwrap();
        let footer_at = frame.find("Esc: отмена").unwrap();
        assert!(frame.contains("Логин"));
        assert!(modal_at > footer_at);
    }
}
