//! Product dictionary section.
//!
//! Admin-gated. Create POSTs with explicit nulls, edit PUTs the full field set
//! prefilled from the selected row, and deactivation is a confirmed DELETE.

use crate::app::modal::{BodyMode, FieldKind, FieldSchema, FieldState, ModalState, SaveSpec};
use crate::domain::Record;
use crate::sections::{Column, SectionSpec};
use reqwest::Method;

pub static SPEC: SectionSpec = SectionSpec {
    title: "Товары",
    add_label: Some("Добавить товар"),
    list_path: "/api/v1/dictionary/products",
    key_field: "code",
    columns: &[
        Column { field: "code", title: "Код" },
        Column { field: "name", title: "Название" },
        Column { field: "type_id", title: "Тип" },
        Column { field: "weight_g", title: "Вес" },
        Column { field: "unit", title: "Ед." },
        Column { field: "price", title: "Цена" },
        Column { field: "expiry_days", title: "Срок" },
    ],
    empty_text: "Нет товаров.",
    non_list_text: "Ошибка загрузки.",
    row_cap: None,
};

/// The create-product form. The unit defaults to "ШТ" when left empty.
#[must_use]
pub fn create_modal(id: u64) -> ModalState {
    let fields = vec![
        FieldState::new(FieldSchema::new("code", "Код", FieldKind::Text).required()),
        FieldState::new(FieldSchema::new("name", "Название", FieldKind::Text).required()),
        FieldState::new(FieldSchema::new(
            "type_id",
            "Тип (Yogurt / Tvorog / Tara)",
            FieldKind::Text,
        )),
        FieldState::new(FieldSchema::new("weight_g", "Вес (г)", FieldKind::Integer)),
        FieldState::with_value(
            FieldSchema::new("unit", "Ед.", FieldKind::Text).fallback("ШТ"),
            "ШТ",
        ),
        FieldState::new(FieldSchema::new("price", "Цена", FieldKind::Decimal)),
        FieldState::new(FieldSchema::new(
            "expiry_days",
            "Срок годности (дней)",
            FieldKind::Integer,
        )),
    ];
    ModalState::form(
        id,
        "Добавить товар",
        fields,
        SaveSpec::create("/api/v1/dictionary/products"),
    )
}

/// The edit-product form, prefilled from the in-memory row record.
#[must_use]
pub fn edit_modal(id: u64, code: &str, record: &Record) -> ModalState {
    let unit = record.text("unit");
    let fields = vec![
        // PUT replaces the record; an emptied name goes out as "".
        FieldState::with_value(
            FieldSchema::new("name", "Название", FieldKind::Text).fallback(""),
            record.text("name"),
        ),
        FieldState::with_value(
            FieldSchema::new("type_id", "Тип", FieldKind::Text),
            record.text("type_id"),
        ),
        FieldState::with_value(
            FieldSchema::new("weight_g", "Вес (г)", FieldKind::Integer),
            record.edit_value("weight_g"),
        ),
        FieldState::with_value(
            FieldSchema::new("unit", "Ед.", FieldKind::Text),
            if unit.is_empty() { "ШТ" } else { unit },
        ),
        FieldState::with_value(
            FieldSchema::new("price", "Цена", FieldKind::Decimal),
            record.edit_value("price"),
        ),
        FieldState::with_value(
            FieldSchema::new("expiry_days", "Срок годности (дней)", FieldKind::Integer),
            record.edit_value("expiry_days"),
        ),
    ];
    let save = SaveSpec {
        method: Method::PUT,
        path: "/api/v1/dictionary/products",
        key: Some(code.to_string()),
        action: None,
        body_mode: BodyMode::NullWhenEmpty,
    };
    ModalState::form(id, format!("Изменить товар: {code}"), fields, save)
}

/// The deactivation confirmation.
#[must_use]
pub fn deactivate_modal(id: u64, code: &str) -> ModalState {
    let save = SaveSpec {
        method: Method::DELETE,
        path: "/api/v1/dictionary/products",
        key: Some(code.to_string()),
        action: None,
        body_mode: BodyMode::NullWhenEmpty,
    };
    ModalState::confirm(id, "Товары", format!("Деактивировать товар {code}?"), save)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn edit_prefills_from_the_selected_record() {
        let record = Record::from_value(json!({
            "code": "P1",
            "name": "Йогурт",
            "weight_g": 250,
            "price": 85.5,
            "type_id": null
        }))
        .unwrap();

        let modal = edit_modal(1, "P1", &record);
        let request = modal.build_request();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.key.as_deref(), Some("P1"));
        assert_eq!(
            request.body.unwrap(),
            json!({
                "name": "Йогурт",
                "type_id": null,
                "weight_g": 250,
                "unit": "ШТ",
                "price": 85.5,
                "expiry_days": null
            })
        );
    }

    #[test]
    fn deactivate_is_a_keyed_delete_without_body() {
        let modal = deactivate_modal(2, "P1");
        let request = modal.build_request();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.key.as_deref(), Some("P1"));
        assert_eq!(request.body, None);
    }
}
