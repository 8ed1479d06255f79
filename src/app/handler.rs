//! Central event handler.
//!
//! Processes semantic events (key presses already translated by the terminal
//! shim, plus completed API outcomes) against [`AppState`] and returns whether
//! a re-render is needed together with the side effects to execute. All
//! staleness decisions live here: a response is applied only if the state it
//! was requested for is still the live state.

use crate::api::RequestSpec;
use crate::app::actions::Action;
use crate::app::modes::{FilterFocus, InputMode};
use crate::app::section::SectionState;
use crate::app::state::{AppState, PreludeState};
use crate::domain::error::Result;
use crate::domain::{can_manage, Record, Session, UserIdentity};
use crate::net::{ApiOutcome, ApiRequest, PreludePart, RequestTag};
use crate::sections::{customers, operations, orders, products, stock, users, warehouses, Resource};

/// The bootstrap identity endpoint.
pub const IDENTITY_PATH: &str = "/api/v1/auth/me";

/// The operation-types dictionary endpoint.
pub const OPERATION_TYPES_PATH: &str = "/api/v1/operation-types";

/// Semantic events fed to [`handle_event`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// First event after the console starts: kicks off the identity check.
    Start,

    /// Row selection down (or warehouse selector forward on the stock
    /// section).
    MoveDown,
    /// Row selection up (or warehouse selector backward).
    MoveUp,
    /// Activate the next section.
    NextSection,
    /// Activate the previous section.
    PrevSection,
    /// Activate a section by 1-based hotkey.
    JumpSection(usize),

    /// Open the create form of the active section.
    Add,
    /// Open the edit form for the selected row.
    Edit,
    /// Open the set-password form for the selected user.
    SetPassword,
    /// Open the deactivation confirmation for the selected product.
    Deactivate,
    /// Re-run the active section's loader.
    Refresh,
    /// Confirm: save the open modal, or fetch stock for the selected
    /// warehouse, or leave filter typing.
    Submit,

    /// Enter filter mode (or return filter focus to the query line).
    EnterFilter,
    /// A printable character for the focused input.
    Char(char),
    /// Delete the last character of the focused input.
    Backspace,
    /// Close the modal or leave filter mode.
    Escape,

    /// Focus the next form field.
    NextField,
    /// Focus the previous form field.
    PrevField,
    /// Cycle the focused select forward.
    NextOption,
    /// Cycle the focused select backward.
    PrevOption,

    /// Exit the console.
    Quit,
    /// Clear the token and return to the login prompt.
    Logout,

    /// A completed API call.
    Api(ApiOutcome),
}

/// Processes one event.
///
/// Returns `(needs_render, actions)`.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the signature uniform with the
/// rest of the crate and leaves room for stateful effects that can fail.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    tracing::trace!(?event, "handling event");

    match event {
        Event::Start => Ok((
            true,
            vec![Action::CallApi(ApiRequest {
                tag: RequestTag::Identity,
                spec: RequestSpec::get(IDENTITY_PATH),
            })],
        )),

        Event::MoveDown => Ok((move_vertical(state, true), vec![])),
        Event::MoveUp => Ok((move_vertical(state, false), vec![])),

        Event::NextSection => {
            let next = state.section.resource.next();
            Ok((true, activate_section(state, next)))
        }
        Event::PrevSection => {
            let prev = state.section.resource.prev();
            Ok((true, activate_section(state, prev)))
        }
        Event::JumpSection(hotkey) => match Resource::from_hotkey(*hotkey) {
            Some(resource) => Ok((true, activate_section(state, resource))),
            None => Ok((false, vec![])),
        },

        Event::Add => Ok(open_create(state)),
        Event::Edit => Ok(open_edit(state)),
        Event::SetPassword => Ok(open_set_password(state)),
        Event::Deactivate => Ok(open_deactivate(state)),
        Event::Refresh => Ok((true, start_load(state))),
        Event::Submit => Ok(submit(state)),

        Event::EnterFilter => {
            if state.modal.is_none() {
                state.input_mode = InputMode::Filter(FilterFocus::Typing);
                Ok((true, vec![]))
            } else {
                Ok((false, vec![]))
            }
        }
        Event::Char(c) => Ok((input_char(state, *c), vec![])),
        Event::Backspace => Ok((backspace(state), vec![])),
        Event::Escape => Ok((escape(state), vec![])),

        Event::NextField => Ok((with_modal(state, |m| m.focus_next()), vec![])),
        Event::PrevField => Ok((with_modal(state, |m| m.focus_prev()), vec![])),
        Event::NextOption => Ok((with_modal(state, |m| m.cycle_option(true)), vec![])),
        Event::PrevOption => Ok((with_modal(state, |m| m.cycle_option(false)), vec![])),

        Event::Quit => Ok((false, vec![Action::Quit])),
        Event::Logout => Ok((false, vec![Action::Logout])),

        Event::Api(outcome) => Ok(apply_outcome(state, outcome)),
    }
}

/// Replaces the section state and starts its loader under a new generation.
fn activate_section(state: &mut AppState, resource: Resource) -> Vec<Action> {
    let generation = state.next_generation();
    state.section = SectionState::new(resource, generation);
    state.filter_query.clear();
    state.input_mode = InputMode::Normal;
    state.apply_row_filter();
    start_load(state)
}

/// Issues the loader for the live section, reusing its generation.
///
/// The stock section loads its warehouse dictionary here; the table itself is
/// fetched only when the operator confirms a warehouse.
fn start_load(state: &mut AppState) -> Vec<Action> {
    let resource = state.section.resource;
    let generation = state.section.generation;
    state.section.loading = true;

    let request = if resource == Resource::Stock {
        ApiRequest {
            tag: RequestTag::SelectorLoad { generation },
            spec: RequestSpec::get(stock::WAREHOUSES_PATH),
        }
    } else {
        ApiRequest {
            tag: RequestTag::SectionLoad {
                resource,
                generation,
            },
            spec: RequestSpec::get(resource.spec().list_path),
        }
    };

    vec![Action::CallApi(request)]
}

fn move_vertical(state: &mut AppState, down: bool) -> bool {
    if state.modal.is_some() {
        return false;
    }
    if let Some(selector) = &mut state.section.selector {
        selector.cycle(down);
        return true;
    }
    if down {
        state.move_selection_down();
    } else {
        state.move_selection_up();
    }
    true
}

fn open_create(state: &mut AppState) -> (bool, Vec<Action>) {
    let resource = state.section.resource;
    if resource.spec().add_label.is_none() || !can_manage(state.session.as_ref(), resource) {
        return (false, vec![]);
    }

    match resource {
        Resource::Users => {
            let id = state.allocate_modal_id();
            state.modal = Some(users::create_modal(id));
            (true, vec![])
        }
        Resource::Products => {
            let id = state.allocate_modal_id();
            state.modal = Some(products::create_modal(id));
            (true, vec![])
        }
        Resource::Warehouses => {
            let id = state.allocate_modal_id();
            state.modal = Some(warehouses::create_modal(id));
            (true, vec![])
        }
        Resource::Customers => {
            let id = state.allocate_modal_id();
            state.modal = Some(customers::create_modal(id));
            (true, vec![])
        }
        // The order form needs the customer list first.
        Resource::Orders => {
            state.section.error = None;
            (
                true,
                vec![Action::CallApi(ApiRequest {
                    tag: RequestTag::OrderPrelude,
                    spec: RequestSpec::get(customers::SPEC.list_path),
                })],
            )
        }
        // The operation form needs three dictionaries at once.
        Resource::Operations => {
            let prelude_id = state.allocate_modal_id();
            state.pending_prelude = Some(PreludeState::new(prelude_id));
            let actions = [
                (PreludePart::Types, OPERATION_TYPES_PATH),
                (PreludePart::Products, products::SPEC.list_path),
                (PreludePart::Customers, customers::SPEC.list_path),
            ]
            .into_iter()
            .map(|(part, path)| {
                Action::CallApi(ApiRequest {
                    tag: RequestTag::OperationPrelude { part, prelude_id },
                    spec: RequestSpec::get(path),
                })
            })
            .collect();
            (true, actions)
        }
        Resource::Stock => (false, vec![]),
    }
}

fn open_edit(state: &mut AppState) -> (bool, Vec<Action>) {
    let resource = state.section.resource;
    if !can_manage(state.session.as_ref(), resource) {
        return (false, vec![]);
    }
    let Some(record) = state.selected_record().cloned() else {
        return (false, vec![]);
    };

    match resource {
        // The user edit form prefills from a re-fetched list, not the row.
        Resource::Users => {
            let Some(login) = record.key("login") else {
                return (false, vec![]);
            };
            let id = state.allocate_modal_id();
            state.modal = Some(users::edit_modal(id, &login));
            (
                true,
                vec![Action::CallApi(ApiRequest {
                    tag: RequestTag::EditPrefill {
                        modal_id: id,
                        key: login,
                    },
                    spec: RequestSpec::get(users::SPEC.list_path),
                })],
            )
        }
        Resource::Products => {
            let Some(code) = record.key("code") else {
                return (false, vec![]);
            };
            let id = state.allocate_modal_id();
            state.modal = Some(products::edit_modal(id, &code, &record));
            (true, vec![])
        }
        Resource::Warehouses => {
            let Some(code) = record.key("code") else {
                return (false, vec![]);
            };
            let id = state.allocate_modal_id();
            state.modal = Some(warehouses::edit_modal(id, &code, &record));
            (true, vec![])
        }
        Resource::Customers => {
            let Some(key) = record.key("id") else {
                return (false, vec![]);
            };
            let id = state.allocate_modal_id();
            state.modal = Some(customers::edit_modal(id, &key, &record));
            (true, vec![])
        }
        Resource::Orders | Resource::Operations | Resource::Stock => (false, vec![]),
    }
}

fn open_set_password(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.section.resource != Resource::Users
        || !can_manage(state.session.as_ref(), Resource::Users)
    {
        return (false, vec![]);
    }
    let Some(login) = state.selected_record().and_then(|r| r.key("login")) else {
        return (false, vec![]);
    };
    let id = state.allocate_modal_id();
    state.modal = Some(users::set_password_modal(id, &login));
    (true, vec![])
}

fn open_deactivate(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.section.resource != Resource::Products
        || !can_manage(state.session.as_ref(), Resource::Products)
    {
        return (false, vec![]);
    }
    let Some(code) = state.selected_record().and_then(|r| r.key("code")) else {
        return (false, vec![]);
    };
    let id = state.allocate_modal_id();
    state.modal = Some(products::deactivate_modal(id, &code));
    (true, vec![])
}

fn submit(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.modal.is_some() {
        return save_modal(state);
    }

    match state.input_mode {
        InputMode::Filter(FilterFocus::Typing) => {
            state.input_mode = InputMode::Filter(FilterFocus::Navigating);
            (true, vec![])
        }
        _ if state.section.resource == Resource::Stock => confirm_warehouse(state),
        _ => (false, vec![]),
    }
}

fn save_modal(state: &mut AppState) -> (bool, Vec<Action>) {
    let Some(modal) = &mut state.modal else {
        return (false, vec![]);
    };
    if modal.saving {
        return (false, vec![]);
    }

    if let Some(label) = modal.missing_required() {
        modal.error = Some(format!("Заполните поле: {label}"));
        return (true, vec![]);
    }

    modal.saving = true;
    modal.error = None;
    let request = ApiRequest {
        tag: RequestTag::ModalSave { modal_id: modal.id },
        spec: modal.build_request(),
    };
    (true, vec![Action::CallApi(request)])
}

fn confirm_warehouse(state: &mut AppState) -> (bool, Vec<Action>) {
    let code = state
        .section
        .selector
        .as_ref()
        .and_then(|s| s.selected_value())
        .filter(|code| !code.is_empty())
        .map(str::to_string);
    let Some(code) = code else {
        return (false, vec![]);
    };

    state.section.loading = true;
    let request = ApiRequest {
        tag: RequestTag::StockLoad {
            generation: state.section.generation,
        },
        spec: RequestSpec {
            query: vec![("warehouse_code".to_string(), code)],
            ..RequestSpec::get(stock::SPEC.list_path)
        },
    };
    (true, vec![Action::CallApi(request)])
}

fn input_char(state: &mut AppState, c: char) -> bool {
    if let Some(modal) = &mut state.modal {
        modal.input_char(c);
        return true;
    }
    if state.input_mode == InputMode::Filter(FilterFocus::Typing) {
        state.filter_query.push(c);
        state.apply_row_filter();
        return true;
    }
    false
}

fn backspace(state: &mut AppState) -> bool {
    if let Some(modal) = &mut state.modal {
        modal.backspace();
        return true;
    }
    if state.input_mode == InputMode::Filter(FilterFocus::Typing) {
        state.filter_query.pop();
        state.apply_row_filter();
        return true;
    }
    false
}

/// Escape closes the modal (even mid-save; the eventual outcome finds no
/// matching modal and is dropped) or resets the filter.
fn escape(state: &mut AppState) -> bool {
    if state.modal.take().is_some() {
        return true;
    }
    if matches!(state.input_mode, InputMode::Filter(_)) {
        state.input_mode = InputMode::Normal;
        state.filter_query.clear();
        state.apply_row_filter();
        return true;
    }
    false
}

fn with_modal(state: &mut AppState, f: impl FnOnce(&mut crate::app::modal::ModalState)) -> bool {
    match &mut state.modal {
        Some(modal) => {
            f(modal);
            true
        }
        None => false,
    }
}

/// Applies a completed API call to the state it was requested for, or drops
/// it as stale.
fn apply_outcome(state: &mut AppState, outcome: &ApiOutcome) -> (bool, Vec<Action>) {
    match &outcome.tag {
        RequestTag::Identity => match &outcome.result {
            Ok(value) => {
                match serde_json::from_value::<UserIdentity>(value.clone()) {
                    Ok(identity) => {
                        tracing::info!(login = %identity.login, "identity confirmed");
                        state.session = Some(Session::new(identity));
                        (true, activate_section(state, Resource::Users))
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "unusable identity response");
                        (false, vec![Action::ReturnToLogin])
                    }
                }
            }
            Err(failure) => {
                tracing::info!(status = failure.status, "identity check failed");
                (false, vec![Action::ReturnToLogin])
            }
        },

        RequestTag::SectionLoad {
            resource,
            generation,
        } => {
            if state.section.resource != *resource || state.section.generation != *generation {
                tracing::debug!(?resource, generation, "dropping stale section load");
                return (false, vec![]);
            }
            apply_section_load(state, outcome);
            (true, vec![])
        }

        RequestTag::SelectorLoad { generation } => {
            if state.section.resource != Resource::Stock
                || state.section.generation != *generation
            {
                return (false, vec![]);
            }
            state.section.loading = false;
            match &outcome.result {
                Ok(value) => {
                    let warehouses = Record::list_from_value(value).unwrap_or_default();
                    if let Some(selector) = &mut state.section.selector {
                        selector.options = stock::warehouse_options(&warehouses);
                        selector.selected = 0;
                        selector.loaded = true;
                    }
                }
                // The selector line simply stays empty.
                Err(failure) => {
                    tracing::warn!(status = failure.status, "warehouse dictionary load failed");
                }
            }
            (true, vec![])
        }

        RequestTag::StockLoad { generation } => {
            if state.section.resource != Resource::Stock
                || state.section.generation != *generation
            {
                return (false, vec![]);
            }
            match &outcome.result {
                Ok(value) => match Record::list_from_value(value) {
                    Some(rows) if !rows.is_empty() => {
                        state.section.set_rows(rows);
                        state.apply_row_filter();
                    }
                    _ => state.section.set_placeholder(stock::NO_ROWS_TEXT),
                },
                Err(_) => state.section.set_error(stock::LOAD_FAILED_TEXT),
            }
            (true, vec![])
        }

        RequestTag::ModalSave { modal_id } => {
            if state.modal.as_ref().map(|m| m.id) != Some(*modal_id) {
                tracing::debug!(modal_id, "dropping save outcome for closed modal");
                return (false, vec![]);
            }
            match &outcome.result {
                Ok(_) => {
                    state.modal = None;
                    (true, start_load(state))
                }
                Err(failure) => {
                    if let Some(modal) = &mut state.modal {
                        modal.saving = false;
                        modal.error = Some(failure.detail_message());
                    }
                    (true, vec![])
                }
            }
        }

        RequestTag::EditPrefill { modal_id, key } => {
            if state.modal.as_ref().map(|m| m.id) != Some(*modal_id) {
                return (false, vec![]);
            }
            let Ok(value) = &outcome.result else {
                return (false, vec![]);
            };
            let Some(rows) = Record::list_from_value(value) else {
                return (false, vec![]);
            };
            let Some(record) = rows.iter().find(|r| r.key("login").as_deref() == Some(key))
            else {
                return (false, vec![]);
            };
            if let Some(modal) = &mut state.modal {
                users::prefill_edit(modal, record);
            }
            (true, vec![])
        }

        RequestTag::OrderPrelude => {
            if state.section.resource != Resource::Orders {
                return (false, vec![]);
            }
            match &outcome.result {
                Ok(value) => {
                    let rows = Record::list_from_value(value).unwrap_or_default();
                    if rows.is_empty() {
                        state.section.error = Some(orders::NO_CUSTOMERS_TEXT.to_string());
                    } else {
                        let id = state.allocate_modal_id();
                        state.modal = Some(orders::create_modal(id, &rows));
                    }
                    (true, vec![])
                }
                Err(failure) => {
                    tracing::warn!(status = failure.status, "order prelude failed");
                    (false, vec![])
                }
            }
        }

        RequestTag::OperationPrelude { part, prelude_id } => {
            if state.pending_prelude.as_ref().map(|p| p.id) != Some(*prelude_id) {
                return (false, vec![]);
            }
            let rows = match &outcome.result {
                Ok(value) => Record::list_from_value(value).unwrap_or_default(),
                Err(failure) => {
                    tracing::warn!(status = failure.status, ?part, "operation prelude failed");
                    state.pending_prelude = None;
                    return (true, vec![]);
                }
            };

            let Some(prelude) = &mut state.pending_prelude else {
                return (false, vec![]);
            };
            match part {
                PreludePart::Types => prelude.types = Some(rows),
                PreludePart::Products => prelude.products = Some(rows),
                PreludePart::Customers => prelude.customers = Some(rows),
            }
            if !prelude.is_complete() {
                return (false, vec![]);
            }

            let Some(prelude) = state.pending_prelude.take() else {
                return (false, vec![]);
            };
            if state.section.resource != Resource::Operations {
                return (false, vec![]);
            }
            state.modal = Some(operations::create_modal(
                prelude.id,
                prelude.types.as_deref().unwrap_or_default(),
                prelude.products.as_deref().unwrap_or_default(),
                prelude.customers.as_deref().unwrap_or_default(),
            ));
            (true, vec![])
        }
    }
}

/// Applies a loader outcome to a non-stock section.
fn apply_section_load(state: &mut AppState, outcome: &ApiOutcome) {
    let spec = state.section.resource.spec();

    match &outcome.result {
        Ok(value) => match Record::list_from_value(value) {
            Some(rows) => {
                state.section.set_rows(rows);
                state.apply_row_filter();
            }
            // Users returns an object for non-admins behind some proxies.
            None => state.section.set_placeholder(spec.non_list_text),
        },
        Err(failure) => {
            if state.section.resource == Resource::Users && failure.status == 403 {
                state.section.set_placeholder(spec.non_list_text);
            } else {
                state.section.set_error(failure.section_message());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiFailure;
    use crate::app::modal::ModalKind;
    use crate::ui::theme::Theme;
    use reqwest::Method;
    use serde_json::{json, Value};

    fn event_for(tag: RequestTag, result: std::result::Result<Value, ApiFailure>) -> Event {
        Event::Api(ApiOutcome { tag, result })
    }

    fn logged_in(role: &str) -> AppState {
        let mut state = AppState::new(Theme::default());
        state.session = Some(Session::new(UserIdentity {
            login: "op".to_string(),
            fio: "Оператор".to_string(),
            role: role.to_string(),
        }));
        state
    }

    fn activated(state: &mut AppState, resource: Resource) -> Vec<Action> {
        let n = resource.index() + 1;
        let (_, actions) = handle_event(state, &Event::JumpSection(n)).unwrap();
        actions
    }

    fn loaded(state: &mut AppState, resource: Resource, rows: Value) {
        activated(state, resource);
        let generation = state.section.generation;
        handle_event(
            state,
            &event_for(
                RequestTag::SectionLoad {
                    resource,
                    generation,
                },
                Ok(rows),
            ),
        )
        .unwrap();
    }

    fn api_requests(actions: &[Action]) -> Vec<&ApiRequest> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::CallApi(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn start_requests_the_identity() {
        let mut state = AppState::new(Theme::default());
        let (_, actions) = handle_event(&mut state, &Event::Start).unwrap();

        let requests = api_requests(&actions);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].tag, RequestTag::Identity);
        assert_eq!(requests[0].spec.path, IDENTITY_PATH);
    }

    #[test]
    fn failed_identity_returns_to_login() {
        let mut state = AppState::new(Theme::default());
        let (_, actions) = handle_event(
            &mut state,
            &event_for(RequestTag::Identity, Err(ApiFailure { status: 401, data: None })),
        )
        .unwrap();
        assert_eq!(actions, vec![Action::ReturnToLogin]);
        assert!(state.session.is_none());
    }

    #[test]
    fn confirmed_identity_loads_the_users_section() {
        let mut state = AppState::new(Theme::default());
        let (_, actions) = handle_event(
            &mut state,
            &event_for(
                RequestTag::Identity,
                Ok(json!({"login": "root", "fio": "Главный", "role": "admin"})),
            ),
        )
        .unwrap();

        assert!(state.session.as_ref().unwrap().is_admin());
        let requests = api_requests(&actions);
        assert_eq!(requests[0].spec.path, "/api/v1/users");
        assert!(matches!(
            requests[0].tag,
            RequestTag::SectionLoad {
                resource: Resource::Users,
                ..
            }
        ));
    }

    #[test]
    fn stale_section_load_is_dropped() {
        let mut state = logged_in("admin");
        activated(&mut state, Resource::Products);
        let old_generation = state.section.generation;
        activated(&mut state, Resource::Customers);

        let (render, _) = handle_event(
            &mut state,
            &event_for(
                RequestTag::SectionLoad {
                    resource: Resource::Products,
                    generation: old_generation,
                },
                Ok(json!([{"code": "P1"}])),
            ),
        )
        .unwrap();

        assert!(!render);
        assert_eq!(state.section.resource, Resource::Customers);
        assert!(state.section.rows.is_empty());
    }

    #[test]
    fn same_section_refresh_outcomes_apply_in_arrival_order() {
        let mut state = logged_in("admin");
        activated(&mut state, Resource::Products);
        let generation = state.section.generation;
        handle_event(&mut state, &Event::Refresh).unwrap();

        for body in [json!([{"code": "P1"}]), json!([{"code": "P2"}])] {
            let (render, _) = handle_event(
                &mut state,
                &event_for(
                    RequestTag::SectionLoad {
                        resource: Resource::Products,
                        generation,
                    },
                    Ok(body),
                ),
            )
            .unwrap();
            assert!(render);
        }
        assert_eq!(state.section.rows[0].text("code"), "P2");
    }

    #[test]
    fn users_403_becomes_an_access_notice_not_an_error() {
        let mut state = logged_in("agent");
        activated(&mut state, Resource::Users);
        let generation = state.section.generation;

        handle_event(
            &mut state,
            &event_for(
                RequestTag::SectionLoad {
                    resource: Resource::Users,
                    generation,
                },
                Err(ApiFailure {
                    status: 403,
                    data: Some(json!({"detail": "Недостаточно прав"})),
                }),
            ),
        )
        .unwrap();

        assert_eq!(
            state.section.placeholder.as_deref(),
            Some("Доступ только для администратора.")
        );
        assert_eq!(state.section.error, None);
    }

    #[test]
    fn other_load_failures_use_the_error_slot() {
        let mut state = logged_in("agent");
        activated(&mut state, Resource::Customers);
        let generation = state.section.generation;

        handle_event(
            &mut state,
            &event_for(
                RequestTag::SectionLoad {
                    resource: Resource::Customers,
                    generation,
                },
                Err(ApiFailure::transport()),
            ),
        )
        .unwrap();
        assert_eq!(state.section.error.as_deref(), Some("Ошибка загрузки"));

        handle_event(&mut state, &Event::Refresh).unwrap();
        handle_event(
            &mut state,
            &event_for(
                RequestTag::SectionLoad {
                    resource: Resource::Customers,
                    generation,
                },
                Err(ApiFailure {
                    status: 403,
                    data: Some(json!({"detail": {"code": 7}})),
                }),
            ),
        )
        .unwrap();
        assert_eq!(state.section.error.as_deref(), Some("Ошибка доступа"));

        // A body-less 403 is still an access refusal, not a load failure.
        handle_event(&mut state, &Event::Refresh).unwrap();
        handle_event(
            &mut state,
            &event_for(
                RequestTag::SectionLoad {
                    resource: Resource::Customers,
                    generation,
                },
                Err(ApiFailure { status: 403, data: None }),
            ),
        )
        .unwrap();
        assert_eq!(state.section.error.as_deref(), Some("Ошибка доступа"));
    }

    #[test]
    fn add_is_refused_without_management_rights() {
        let mut state = logged_in("agent");
        activated(&mut state, Resource::Products);
        let (render, actions) = handle_event(&mut state, &Event::Add).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.modal.is_none());

        // Customers are open to any operator.
        activated(&mut state, Resource::Customers);
        handle_event(&mut state, &Event::Add).unwrap();
        assert!(state.modal.is_some());
    }

    #[test]
    fn opening_a_modal_replaces_the_previous_one() {
        let mut state = logged_in("admin");
        loaded(
            &mut state,
            Resource::Products,
            json!([{"code": "P1", "name": "Йогурт"}]),
        );

        handle_event(&mut state, &Event::Add).unwrap();
        let first_id = state.modal.as_ref().unwrap().id;
        handle_event(&mut state, &Event::Edit).unwrap();
        let second_id = state.modal.as_ref().unwrap().id;

        assert_ne!(first_id, second_id);
        assert!(state
            .modal
            .as_ref()
            .unwrap()
            .title
            .starts_with("Изменить товар"));
    }

    #[test]
    fn save_outcome_for_a_closed_modal_is_dropped() {
        let mut state = logged_in("admin");
        loaded(&mut state, Resource::Customers, json!([{"id": 1}]));

        handle_event(&mut state, &Event::Add).unwrap();
        let modal_id = state.modal.as_ref().unwrap().id;
        handle_event(&mut state, &Event::Submit).unwrap();
        handle_event(&mut state, &Event::Escape).unwrap();
        assert!(state.modal.is_none());

        let (render, actions) = handle_event(
            &mut state,
            &event_for(RequestTag::ModalSave { modal_id }, Ok(Value::Null)),
        )
        .unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn failed_save_shows_the_detail_and_keeps_the_modal_open() {
        let mut state = logged_in("admin");
        activated(&mut state, Resource::Warehouses);
        handle_event(&mut state, &Event::Add).unwrap();
        for c in "СКЛ1".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        handle_event(&mut state, &Event::NextField).unwrap();
        for c in "Основной".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        handle_event(&mut state, &Event::Submit).unwrap();
        assert!(state.modal.as_ref().unwrap().saving);

        let modal_id = state.modal.as_ref().unwrap().id;
        handle_event(
            &mut state,
            &event_for(
                RequestTag::ModalSave { modal_id },
                Err(ApiFailure {
                    status: 400,
                    data: Some(json!({"detail": "Код уже занят"})),
                }),
            ),
        )
        .unwrap();

        let modal = state.modal.as_ref().unwrap();
        assert!(!modal.saving);
        assert_eq!(modal.error.as_deref(), Some("Код уже занят"));
    }

    #[test]
    fn successful_save_closes_the_modal_and_refreshes() {
        let mut state = logged_in("admin");
        activated(&mut state, Resource::Customers);
        let generation = state.section.generation;

        handle_event(&mut state, &Event::Add).unwrap();
        let modal_id = state.modal.as_ref().unwrap().id;
        let (_, save_actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let requests = api_requests(&save_actions);
        assert_eq!(requests[0].spec.method, Method::POST);
        assert_eq!(requests[0].spec.path, "/api/v1/customers");

        let (_, actions) = handle_event(
            &mut state,
            &event_for(RequestTag::ModalSave { modal_id }, Ok(json!({"id": 5}))),
        )
        .unwrap();

        assert!(state.modal.is_none());
        let requests = api_requests(&actions);
        assert_eq!(
            requests[0].tag,
            RequestTag::SectionLoad {
                resource: Resource::Customers,
                generation,
            }
        );
    }

    #[test]
    fn empty_required_field_blocks_the_save() {
        let mut state = logged_in("admin");
        activated(&mut state, Resource::Users);
        handle_event(&mut state, &Event::Add).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert!(actions.is_empty());
        let modal = state.modal.as_ref().unwrap();
        assert!(!modal.saving);
        assert_eq!(modal.error.as_deref(), Some("Заполните поле: Логин"));
    }

    #[test]
    fn stock_enter_without_a_warehouse_is_a_no_op() {
        let mut state = logged_in("agent");
        activated(&mut state, Resource::Stock);
        let (render, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn stock_enter_queries_the_selected_warehouse() {
        let mut state = logged_in("agent");
        activated(&mut state, Resource::Stock);
        let generation = state.section.generation;

        handle_event(
            &mut state,
            &event_for(
                RequestTag::SelectorLoad { generation },
                Ok(json!([
                    {"code": "СКЛ1", "name": "Основной"},
                    {"code": "СКЛ2", "name": "Резервный"}
                ])),
            ),
        )
        .unwrap();
        handle_event(&mut state, &Event::MoveDown).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Submit).unwrap();
        let requests = api_requests(&actions);
        assert_eq!(requests[0].spec.path, "/api/v1/stock");
        assert_eq!(
            requests[0].spec.query,
            vec![("warehouse_code".to_string(), "СКЛ2".to_string())]
        );

        handle_event(
            &mut state,
            &event_for(RequestTag::StockLoad { generation }, Ok(json!([]))),
        )
        .unwrap();
        assert_eq!(
            state.section.placeholder.as_deref(),
            Some("Нет остатков или таблица warehouse_stock не создана (миграция 002).")
        );

        handle_event(
            &mut state,
            &event_for(
                RequestTag::StockLoad { generation },
                Err(ApiFailure::transport()),
            ),
        )
        .unwrap();
        assert_eq!(
            state.section.error.as_deref(),
            Some("Ошибка загрузки остатков.")
        );
    }

    #[test]
    fn order_form_needs_at_least_one_customer() {
        let mut state = logged_in("agent");
        activated(&mut state, Resource::Orders);

        let (_, actions) = handle_event(&mut state, &Event::Add).unwrap();
        assert_eq!(api_requests(&actions)[0].tag, RequestTag::OrderPrelude);

        handle_event(
            &mut state,
            &event_for(RequestTag::OrderPrelude, Ok(json!([]))),
        )
        .unwrap();
        assert!(state.modal.is_none());
        assert_eq!(
            state.section.error.as_deref(),
            Some("Сначала добавьте клиента.")
        );

        handle_event(&mut state, &Event::Add).unwrap();
        handle_event(
            &mut state,
            &event_for(
                RequestTag::OrderPrelude,
                Ok(json!([{"id": 1, "name_client": "ООО Ромашка"}])),
            ),
        )
        .unwrap();
        assert!(state.modal.is_some());
        assert_eq!(state.section.error, None);
    }

    #[test]
    fn operation_form_opens_only_after_all_three_dictionaries() {
        let mut state = logged_in("admin");
        activated(&mut state, Resource::Operations);

        let (_, actions) = handle_event(&mut state, &Event::Add).unwrap();
        assert_eq!(api_requests(&actions).len(), 3);
        let prelude_id = state.pending_prelude.as_ref().unwrap().id;

        let parts = [
            (PreludePart::Types, json!([{"code": "IN", "name": "Приход"}])),
            (PreludePart::Products, json!([{"code": "P1", "name": "Йогурт"}])),
        ];
        for (part, body) in parts {
            handle_event(
                &mut state,
                &event_for(RequestTag::OperationPrelude { part, prelude_id }, Ok(body)),
            )
            .unwrap();
            assert!(state.modal.is_none());
        }

        handle_event(
            &mut state,
            &event_for(
                RequestTag::OperationPrelude {
                    part: PreludePart::Customers,
                    prelude_id,
                },
                Ok(json!([])),
            ),
        )
        .unwrap();

        let modal = state.modal.as_ref().unwrap();
        assert!(matches!(modal.kind, ModalKind::Form { .. }));
        assert!(state.pending_prelude.is_none());
    }

    #[test]
    fn failed_prelude_part_discards_the_whole_prelude() {
        let mut state = logged_in("admin");
        activated(&mut state, Resource::Operations);
        handle_event(&mut state, &Event::Add).unwrap();
        let prelude_id = state.pending_prelude.as_ref().unwrap().id;

        handle_event(
            &mut state,
            &event_for(
                RequestTag::OperationPrelude {
                    part: PreludePart::Products,
                    prelude_id,
                },
                Err(ApiFailure::transport()),
            ),
        )
        .unwrap();

        assert!(state.pending_prelude.is_none());
        assert!(state.modal.is_none());
    }

    #[test]
    fn user_edit_prefills_from_the_refetched_list() {
        let mut state = logged_in("admin");
        loaded(
            &mut state,
            Resource::Users,
            json!([{"login": "ivanov", "fio": "Иванов И.И.", "role": "agent"}]),
        );

        let (_, actions) = handle_event(&mut state, &Event::Edit).unwrap();
        let modal_id = state.modal.as_ref().unwrap().id;
        let requests = api_requests(&actions);
        assert_eq!(
            requests[0].tag,
            RequestTag::EditPrefill {
                modal_id,
                key: "ivanov".to_string(),
            }
        );

        handle_event(
            &mut state,
            &event_for(
                RequestTag::EditPrefill {
                    modal_id,
                    key: "ivanov".to_string(),
                },
                Ok(json!([
                    {"login": "petrov", "fio": "Петров", "role": "admin"},
                    {"login": "ivanov", "fio": "Иванов И.И.", "role": "expeditor", "phone": "+7 900"}
                ])),
            ),
        )
        .unwrap();

        let body = state.modal.as_ref().unwrap().build_request().body.unwrap();
        assert_eq!(body["fio"], "Иванов И.И.");
        assert_eq!(body["role"], "expeditor");
        assert_eq!(body["phone"], "+7 900");
    }

    #[test]
    fn filter_mode_narrows_rows_and_escape_resets() {
        let mut state = logged_in("agent");
        loaded(
            &mut state,
            Resource::Customers,
            json!([
                {"id": 1, "name_client": "Ромашка"},
                {"id": 2, "name_client": "Василёк"}
            ]),
        );

        handle_event(&mut state, &Event::EnterFilter).unwrap();
        assert_eq!(state.input_mode, InputMode::Filter(FilterFocus::Typing));
        for c in "вас".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        assert_eq!(state.filtered_rows, vec![1]);

        handle_event(&mut state, &Event::Submit).unwrap();
        assert_eq!(state.input_mode, InputMode::Filter(FilterFocus::Navigating));

        handle_event(&mut state, &Event::Escape).unwrap();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.filter_query.is_empty());
        assert_eq!(state.filtered_rows, vec![0, 1]);
    }

    #[test]
    fn navigation_resets_the_filter_and_bumps_the_generation() {
        let mut state = logged_in("agent");
        loaded(&mut state, Resource::Customers, json!([{"id": 1}]));
        let generation = state.section.generation;
        handle_event(&mut state, &Event::EnterFilter).unwrap();
        handle_event(&mut state, &Event::Char('x')).unwrap();

        handle_event(&mut state, &Event::NextSection).unwrap();
        assert_eq!(state.section.resource, Resource::Orders);
        assert!(state.section.generation > generation);
        assert!(state.filter_query.is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn quit_and_logout_surface_as_actions() {
        let mut state = logged_in("agent");
        let (_, actions) = handle_event(&mut state, &Event::Quit).unwrap();
        assert_eq!(actions, vec![Action::Quit]);

        let (_, actions) = handle_event(&mut state, &Event::Logout).unwrap();
        assert_eq!(actions, vec![Action::Logout]);
    }
}
