//! Per-warehouse stock section.
//!
//! Read-only. Activation loads the warehouse dictionary into a selector;
//! rows are fetched on demand with `GET /api/v1/stock?warehouse_code={code}`
//! once the operator confirms a warehouse. An empty (or non-list) result is a
//! dedicated notice rather than an empty table.

use crate::app::modal::SelectOption;
use crate::domain::Record;
use crate::sections::{Column, SectionSpec};

/// Source of the warehouse selector options.
pub const WAREHOUSES_PATH: &str = "/api/v1/dictionary/warehouses";

/// Notice for an empty or non-list stock response.
pub const NO_ROWS_TEXT: &str =
    "Нет остатков или таблица warehouse_stock не создана (миграция 002).";

/// Error slot text for a failed stock load.
pub const LOAD_FAILED_TEXT: &str = "Ошибка загрузки остатков.";

pub static SPEC: SectionSpec = SectionSpec {
    title: "Остатки по складу",
    add_label: None,
    list_path: "/api/v1/stock",
    key_field: "product_code",
    columns: &[
        Column { field: "product_code", title: "Код товара" },
        Column { field: "name", title: "Название" },
        Column { field: "quantity", title: "Количество" },
    ],
    empty_text: NO_ROWS_TEXT,
    non_list_text: NO_ROWS_TEXT,
    row_cap: None,
};

/// Builds selector options from the warehouse dictionary: "Name (CODE)".
#[must_use]
pub fn warehouse_options(warehouses: &[Record]) -> Vec<SelectOption> {
    warehouses
        .iter()
        .filter_map(|w| {
            let code = w.key("code")?;
            let label = format!("{} ({})", w.text("name"), code);
            Some(SelectOption::new(code, label))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn selector_labels_combine_name_and_code() {
        let warehouses = vec![
            Record::from_value(json!({"code": "W1", "name": "Основной"})).unwrap(),
            Record::from_value(json!({"name": "без кода"})).unwrap(),
        ];
        let options = warehouse_options(&warehouses);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].value, "W1");
        assert_eq!(options[0].label, "Основной (W1)");
    }
}
