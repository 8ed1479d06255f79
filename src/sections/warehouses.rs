//! Warehouse dictionary section.
//!
//! Admin-gated. Create POSTs, edit PUTs the full field set prefilled from the
//! selected row. No delete flow exists for warehouses.

use crate::app::modal::{BodyMode, FieldKind, FieldSchema, FieldState, ModalState, SaveSpec};
use crate::domain::Record;
use crate::sections::{Column, SectionSpec};
use reqwest::Method;

pub static SPEC: SectionSpec = SectionSpec {
    title: "Склады",
    add_label: Some("Добавить склад"),
    list_path: "/api/v1/dictionary/warehouses",
    key_field: "code",
    columns: &[
        Column { field: "code", title: "Код" },
        Column { field: "name", title: "Название" },
        Column { field: "type", title: "Тип" },
        Column { field: "storekeeper", title: "Кладовщик" },
        Column { field: "agent", title: "Агент" },
    ],
    empty_text: "Нет складов.",
    non_list_text: "Ошибка загрузки.",
    row_cap: None,
};

/// The create-warehouse form.
#[must_use]
pub fn create_modal(id: u64) -> ModalState {
    let fields = vec![
        FieldState::new(FieldSchema::new("code", "Код", FieldKind::Text).required()),
        FieldState::new(FieldSchema::new("name", "Название", FieldKind::Text).required()),
        FieldState::new(FieldSchema::new("type", "Тип", FieldKind::Text)),
        FieldState::new(FieldSchema::new(
            "storekeeper",
            "Кладовщик (логин)",
            FieldKind::Text,
        )),
        FieldState::new(FieldSchema::new("agent", "Агент", FieldKind::Text)),
    ];
    ModalState::form(
        id,
        "Добавить склад",
        fields,
        SaveSpec::create("/api/v1/dictionary/warehouses"),
    )
}

/// The edit-warehouse form, prefilled from the in-memory row record.
#[must_use]
pub fn edit_modal(id: u64, code: &str, record: &Record) -> ModalState {
    let fields = vec![
        FieldState::with_value(
            FieldSchema::new("name", "Название", FieldKind::Text).fallback(""),
            record.text("name"),
        ),
        FieldState::with_value(
            FieldSchema::new("type", "Тип", FieldKind::Text),
            record.text("type"),
        ),
        FieldState::with_value(
            FieldSchema::new("storekeeper", "Кладовщик", FieldKind::Text),
            record.text("storekeeper"),
        ),
        FieldState::with_value(
            FieldSchema::new("agent", "Агент", FieldKind::Text),
            record.text("agent"),
        ),
    ];
    let save = SaveSpec {
        method: Method::PUT,
        path: "/api/v1/dictionary/warehouses",
        key: Some(code.to_string()),
        action: None,
        body_mode: BodyMode::NullWhenEmpty,
    };
    ModalState::form(id, format!("Изменить склад: {code}"), fields, save)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn edit_sends_nulls_for_cleared_optionals() {
        let record = Record::from_value(json!({
            "code": "W1",
            "name": "Основной",
            "type": "Склад реализации"
        }))
        .unwrap();

        let request = edit_modal(1, "W1", &record).build_request();
        assert_eq!(
            request.body.unwrap(),
            json!({
                "name": "Основной",
                "type": "Склад реализации",
                "storekeeper": null,
                "agent": null
            })
        );
    }
}
