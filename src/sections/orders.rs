//! Orders section.
//!
//! Open to any authenticated operator. Creating an order first needs the
//! customer directory; with no customers on file the console refuses with a
//! notice instead of opening the form.

use crate::app::modal::{FieldKind, FieldSchema, FieldState, ModalState, SaveSpec, SelectOption};
use crate::domain::Record;
use crate::sections::{Column, SectionSpec};

/// Order statuses accepted by the backend, first one is the form default.
pub const STATUSES: [&str; 4] = ["open", "delivery", "completed", "canceled"];

/// Notice shown when order creation is attempted with no customers on file.
pub const NO_CUSTOMERS_TEXT: &str = "Сначала добавьте клиента.";

pub static SPEC: SectionSpec = SectionSpec {
    title: "Заказы",
    add_label: Some("Создать заказ"),
    list_path: "/api/v1/orders",
    key_field: "id",
    columns: &[
        Column { field: "id", title: "ID" },
        Column { field: "customer_id", title: "Клиент" },
        Column { field: "order_date", title: "Дата" },
        Column { field: "status_code", title: "Статус" },
        Column { field: "total_amount", title: "Сумма" },
    ],
    empty_text: "Нет заказов.",
    non_list_text: "Ошибка загрузки.",
    row_cap: None,
};

/// Builds customer select options: label is the firm name, falling back to
/// the id when unnamed.
#[must_use]
pub fn customer_options(customers: &[Record]) -> Vec<SelectOption> {
    customers
        .iter()
        .filter_map(|c| {
            let id = c.key("id")?;
            let name = c.text("name_client");
            let label = if name.is_empty() { id.clone() } else { name.to_string() };
            Some(SelectOption::new(id, label))
        })
        .collect()
}

/// The create-order form, built once the customer list has arrived.
#[must_use]
pub fn create_modal(id: u64, customers: &[Record]) -> ModalState {
    let fields = vec![
        FieldState::new(FieldSchema::new(
            "customer_id",
            "Клиент",
            FieldKind::Select(customer_options(customers)),
        )),
        FieldState::new(FieldSchema::new(
            "status_code",
            "Статус",
            FieldKind::Select(STATUSES.iter().copied().map(SelectOption::plain).collect()),
        )),
    ];
    ModalState::form(
        id,
        "Создать заказ",
        fields,
        SaveSpec::create("/api/v1/orders"),
    )
}
