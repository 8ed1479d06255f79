//! Operator accounts section.
//!
//! Admin-gated. Besides create and edit, users carry a dedicated set-password
//! action (`POST /api/v1/users/{login}/set-password`). Edit prefill re-fetches
//! the collection and scans for the login; there is no single-user read
//! endpoint.

use crate::app::modal::{
    BodyMode, FieldKind, FieldSchema, FieldState, ModalState, SaveSpec, SelectOption,
};
use crate::domain::Record;
use crate::sections::{Column, SectionSpec};
use reqwest::Method;

/// Roles accepted by the backend, first one is the form default.
pub const ROLES: [&str; 5] = ["agent", "admin", "expeditor", "stockman", "paymaster"];

pub static SPEC: SectionSpec = SectionSpec {
    title: "Пользователи",
    add_label: Some("Добавить пользователя"),
    list_path: "/api/v1/users",
    key_field: "login",
    columns: &[
        Column { field: "login", title: "Логин" },
        Column { field: "fio", title: "ФИО" },
        Column { field: "role", title: "Роль" },
        Column { field: "status", title: "Статус" },
        Column { field: "has_password", title: "Пароль" },
    ],
    empty_text: "Нет пользователей.",
    non_list_text: "Доступ только для администратора.",
    row_cap: None,
};

fn role_select() -> FieldKind {
    FieldKind::Select(ROLES.iter().copied().map(SelectOption::plain).collect())
}

/// The create-user form.
#[must_use]
pub fn create_modal(id: u64) -> ModalState {
    let fields = vec![
        FieldState::new(FieldSchema::new("login", "Логин", FieldKind::Text).required()),
        FieldState::new(FieldSchema::new("fio", "ФИО", FieldKind::Text).required()),
        FieldState::new(FieldSchema::new("password", "Пароль", FieldKind::Password).required()),
        FieldState::new(FieldSchema::new("role", "Роль", role_select())),
        FieldState::new(FieldSchema::new("phone", "Телефон", FieldKind::Text)),
        FieldState::new(FieldSchema::new("email", "Email", FieldKind::Text)),
    ];
    ModalState::form(
        id,
        "Добавить пользователя",
        fields,
        SaveSpec::create("/api/v1/users"),
    )
}

/// The edit-user form, opened empty and prefilled asynchronously once the
/// collection re-fetch returns.
#[must_use]
pub fn edit_modal(id: u64, login: &str) -> ModalState {
    let fields = vec![
        FieldState::new(FieldSchema::new("fio", "ФИО", FieldKind::Text)),
        FieldState::new(FieldSchema::new("role", "Роль", role_select())),
        FieldState::new(FieldSchema::new("status", "Статус", FieldKind::Text)),
        FieldState::new(FieldSchema::new("phone", "Телефон", FieldKind::Text)),
        FieldState::new(FieldSchema::new("email", "Email", FieldKind::Text)),
    ];
    let save = SaveSpec {
        method: Method::PATCH,
        path: "/api/v1/users",
        key: Some(login.to_string()),
        action: None,
        body_mode: BodyMode::OmitWhenEmpty,
    };
    ModalState::form(id, format!("Изменить пользователя: {login}"), fields, save)
}

/// Applies the fetched record to an open edit form.
pub fn prefill_edit(modal: &mut ModalState, record: &Record) {
    modal.prefill("fio", record.text("fio"));
    let role = record.text("role");
    modal.prefill("role", if role.is_empty() { "agent" } else { role });
    let status = record.text("status");
    modal.prefill("status", if status.is_empty() { "активен" } else { status });
    modal.prefill("phone", record.text("phone"));
    modal.prefill("email", record.text("email"));
}

/// The set-password form.
#[must_use]
pub fn set_password_modal(id: u64, login: &str) -> ModalState {
    let fields = vec![FieldState::new(
        FieldSchema::new("password", "Новый пароль", FieldKind::Password).required(),
    )];
    let save = SaveSpec {
        method: Method::POST,
        path: "/api/v1/users",
        key: Some(login.to_string()),
        action: Some("set-password"),
        body_mode: BodyMode::NullWhenEmpty,
    };
    ModalState::form(id, format!("Сменить пароль: {login}"), fields, save)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn edit_prefill_defaults_role_and_status() {
        let mut modal = edit_modal(1, "petrov");
        let record =
            Record::from_value(json!({"login": "petrov", "fio": "Петров П.П."})).unwrap();
        prefill_edit(&mut modal, &record);

        let body = modal.build_request().body.unwrap();
        assert_eq!(body["fio"], "Петров П.П.");
        assert_eq!(body["role"], "agent");
        assert_eq!(body["status"], "активен");
        // Untouched optionals stay out of the PATCH body.
        assert!(body.get("phone").is_none());
    }

    #[test]
    fn create_form_offers_every_role() {
        use crate::app::modal::ModalKind;

        let modal = create_modal(1);
        let ModalKind::Form { fields, .. } = &modal.kind else {
            panic!("create modal is a form");
        };
        let role = fields.iter().find(|f| f.schema.key == "role").unwrap();
        let FieldKind::Select(options) = &role.schema.kind else {
            panic!("role is a select");
        };
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ROLES);
    }

    #[test]
    fn set_password_targets_the_action_segment() {
        let mut modal = set_password_modal(2, "petrov");
        modal.input_char('x');
        let request = modal.build_request();
        assert_eq!(request.path, "/api/v1/users");
        assert_eq!(request.key.as_deref(), Some("petrov"));
        assert_eq!(request.action, Some("set-password"));
        assert_eq!(request.body.unwrap(), json!({"password": "x"}));
    }
}
