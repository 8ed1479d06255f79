//! Customer directory section.
//!
//! Open to any authenticated operator. Create POSTs an all-optional body with
//! explicit nulls; edit PATCHes the keyed record by numeric `id`, omitting
//! untouched fields.

use crate::app::modal::{BodyMode, FieldKind, FieldSchema, FieldState, ModalState, SaveSpec};
use crate::domain::Record;
use crate::sections::{Column, SectionSpec};
use reqwest::Method;

pub static SPEC: SectionSpec = SectionSpec {
    title: "Клиенты",
    add_label: Some("Добавить клиента"),
    list_path: "/api/v1/customers",
    key_field: "id",
    columns: &[
        Column { field: "name_client", title: "Название" },
        Column { field: "city", title: "Город" },
        Column { field: "phone", title: "Телефон" },
        Column { field: "login_agent", title: "Агент" },
        Column { field: "login_expeditor", title: "Экспедитор" },
    ],
    empty_text: "Нет клиентов.",
    non_list_text: "Ошибка загрузки.",
    row_cap: None,
};

/// The create-customer form; every field is optional.
#[must_use]
pub fn create_modal(id: u64) -> ModalState {
    let fields = vec![
        FieldState::new(FieldSchema::new(
            "name_client",
            "Название / Фирма",
            FieldKind::Text,
        )),
        FieldState::new(FieldSchema::new("city", "Город", FieldKind::Text)),
        FieldState::new(FieldSchema::new("address", "Адрес", FieldKind::Text)),
        FieldState::new(FieldSchema::new("phone", "Телефон", FieldKind::Text)),
        FieldState::new(FieldSchema::new(
            "login_agent",
            "Логин агента",
            FieldKind::Text,
        )),
        FieldState::new(FieldSchema::new(
            "login_expeditor",
            "Логин экспедитора",
            FieldKind::Text,
        )),
    ];
    ModalState::form(
        id,
        "Добавить клиента",
        fields,
        SaveSpec::create("/api/v1/customers"),
    )
}

/// The edit-customer form, prefilled from the in-memory row record.
#[must_use]
pub fn edit_modal(id: u64, key: &str, record: &Record) -> ModalState {
    let fields = vec![
        FieldState::with_value(
            FieldSchema::new("name_client", "Название", FieldKind::Text),
            record.text("name_client"),
        ),
        FieldState::with_value(
            FieldSchema::new("city", "Город", FieldKind::Text),
            record.text("city"),
        ),
        FieldState::with_value(
            FieldSchema::new("phone", "Телефон", FieldKind::Text),
            record.text("phone"),
        ),
        FieldState::with_value(
            FieldSchema::new("status", "Статус", FieldKind::Text),
            record.text("status"),
        ),
    ];
    let save = SaveSpec {
        method: Method::PATCH,
        path: "/api/v1/customers",
        key: Some(key.to_string()),
        action: None,
        body_mode: BodyMode::OmitWhenEmpty,
    };
    ModalState::form(id, "Изменить клиента", fields, save)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn edit_patches_only_filled_fields() {
        let record = Record::from_value(json!({
            "id": 7,
            "name_client": "ООО Ромашка",
            "city": ""
        }))
        .unwrap();

        let request = edit_modal(1, "7", &record).build_request();
        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.key.as_deref(), Some("7"));
        assert_eq!(request.body.unwrap(), json!({"name_client": "ООО Ромашка"}));
    }
}
