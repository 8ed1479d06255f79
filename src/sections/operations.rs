//! Inventory operations section.
//!
//! Admin-gated. The create form needs three dictionaries at once (operation
//! types, products, customers); the loads run concurrently and buffer until
//! all have arrived. The journal table caps at 100 rows.

use crate::app::modal::{FieldKind, FieldSchema, FieldState, ModalState, SaveSpec, SelectOption};
use crate::domain::Record;
use crate::sections::{Column, SectionSpec};

pub static SPEC: SectionSpec = SectionSpec {
    title: "Операции",
    add_label: Some("Создать операцию"),
    list_path: "/api/v1/operations",
    key_field: "product_code",
    columns: &[
        Column { field: "operation_date", title: "Дата" },
        Column { field: "type_code", title: "Тип" },
        Column { field: "product_code", title: "Товар" },
        Column { field: "quantity", title: "Кол-во" },
        Column { field: "amount", title: "Сумма" },
        Column { field: "created_by", title: "Кто" },
    ],
    empty_text: "Нет операций.",
    non_list_text: "Ошибка загрузки.",
    row_cap: Some(100),
};

fn type_options(types: &[Record]) -> Vec<SelectOption> {
    types
        .iter()
        .filter_map(|t| {
            let code = t.key("code")?;
            let label = format!("{} ({})", t.text("name"), code);
            Some(SelectOption::new(code, label))
        })
        .collect()
}

fn product_options(products: &[Record]) -> Vec<SelectOption> {
    products
        .iter()
        .filter_map(|p| Some(SelectOption::new(p.key("code")?, p.text("name"))))
        .collect()
}

fn customer_options(customers: &[Record]) -> Vec<SelectOption> {
    // Leading blank option: operations without a counterparty send null.
    let mut options = vec![SelectOption::new("", "—")];
    options.extend(crate::sections::orders::customer_options(customers));
    options
}

/// The create-operation form, built once all three dictionaries have arrived.
/// The date defaults to today.
#[must_use]
pub fn create_modal(
    id: u64,
    types: &[Record],
    products: &[Record],
    customers: &[Record],
) -> ModalState {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let fields = vec![
        FieldState::with_value(
            FieldSchema::new("operation_date", "Дата", FieldKind::Date).required(),
            today,
        ),
        FieldState::new(FieldSchema::new(
            "type_code",
            "Тип операции",
            FieldKind::Select(type_options(types)),
        )),
        FieldState::new(FieldSchema::new(
            "product_code",
            "Товар",
            FieldKind::Select(product_options(products)),
        )),
        FieldState::new(FieldSchema::new("quantity", "Количество", FieldKind::Integer).required()),
        FieldState::new(FieldSchema::new("amount", "Сумма", FieldKind::Decimal)),
        FieldState::new(FieldSchema::new(
            "customer_id",
            "Клиент (для продажи/возврата)",
            FieldKind::Select(customer_options(customers)),
        )),
        FieldState::new(FieldSchema::new("comment", "Комментарий", FieldKind::Text)),
    ];
    ModalState::form(
        id,
        "Создать операцию (приход/расход/продажа)",
        fields,
        SaveSpec::create("/api/v1/operations"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_form_defaults_to_no_customer_and_today() {
        let types = vec![Record::from_value(json!({"code": "IN", "name": "Приход"})).unwrap()];
        let products = vec![Record::from_value(json!({"code": "P1", "name": "Йогурт"})).unwrap()];

        let mut modal = create_modal(1, &types, &products, &[]);
        modal.prefill("quantity", "10");

        let body = modal.build_request().body.unwrap();
        assert_eq!(body["type_code"], "IN");
        assert_eq!(body["product_code"], "P1");
        assert_eq!(body["quantity"], 10);
        assert_eq!(body["customer_id"], serde_json::Value::Null);
        assert_eq!(body["amount"], serde_json::Value::Null);
        let date = body["operation_date"].as_str().unwrap();
        assert_eq!(date.len(), 10);
        assert_eq!(&date[4..5], "-");
    }
}
