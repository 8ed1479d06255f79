//! The single-modal state machine.
//!
//! At most one modal exists at a time, owned by `AppState` as an
//! `Option<ModalState>`; opening a new modal replaces the old one atomically.
//! Each modal carries a unique id, and save outcomes arriving for any other id
//! are dropped, so a response from a replaced modal can never touch the live
//! one.
//!
//! The lifecycle is closed → open → saving → closed (or closed on cancel).
//! Validation is presence-only for required fields; everything else is the
//! backend's job and comes back through the error envelope.

use crate::api::RequestSpec;
use reqwest::Method;
use serde_json::{Map, Number, Value};

/// One option of a select field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Value sent to the backend.
    pub value: String,
    /// Label shown to the operator.
    pub label: String,
}

impl SelectOption {
    /// Creates an option with distinct value and label.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Creates an option whose label equals its value.
    #[must_use]
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Input kind of a form field. Determines editing behavior and the JSON type
/// produced for the save body.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Free text, trimmed before sending.
    Text,
    /// Secret text, sent untrimmed and rendered masked.
    Password,
    /// Whole number; unparseable input degrades to `null`.
    Integer,
    /// Decimal number; unparseable input degrades to `null`.
    Decimal,
    /// ISO date string (`YYYY-MM-DD`), edited as text.
    Date,
    /// One-of-N choice cycled with arrow keys.
    Select(Vec<SelectOption>),
}

/// Static description of one form field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    /// JSON body key.
    pub key: &'static str,
    /// Label shown next to the input.
    pub label: &'static str,
    /// Input kind.
    pub kind: FieldKind,
    /// Whether the field must be non-empty to save.
    pub required: bool,
    /// Value substituted when the field is left empty, instead of the
    /// body-mode default (used for the product unit's "ШТ").
    pub fallback: Option<&'static str>,
}

impl FieldSchema {
    /// Creates an optional field of the given kind.
    #[must_use]
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
            fallback: None,
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the empty-value fallback.
    #[must_use]
    pub const fn fallback(mut self, value: &'static str) -> Self {
        self.fallback = Some(value);
        self
    }
}

/// Live editing state of one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    /// The field description.
    pub schema: FieldSchema,
    /// Current text value (unused for selects).
    pub value: String,
    /// Current option index (selects only).
    pub option: usize,
}

impl FieldState {
    /// An empty field.
    #[must_use]
    pub const fn new(schema: FieldSchema) -> Self {
        Self {
            schema,
            value: String::new(),
            option: 0,
        }
    }

    /// A text field prefilled with a value.
    #[must_use]
    pub fn with_value(schema: FieldSchema, value: impl Into<String>) -> Self {
        Self {
            schema,
            value: value.into(),
            option: 0,
        }
    }

    /// A select field positioned on the option matching `value`, or the first
    /// option when no match exists.
    #[must_use]
    pub fn with_selected(schema: FieldSchema, value: &str) -> Self {
        let option = match &schema.kind {
            FieldKind::Select(options) => options
                .iter()
                .position(|opt| opt.value == value)
                .unwrap_or(0),
            _ => 0,
        };
        Self {
            schema,
            value: String::new(),
            option,
        }
    }

    /// The value this field would contribute to a save body, before trimming.
    #[must_use]
    pub fn raw_value(&self) -> String {
        match &self.schema.kind {
            FieldKind::Select(options) => options
                .get(self.option)
                .map(|opt| opt.value.clone())
                .unwrap_or_default(),
            _ => self.value.clone(),
        }
    }

    /// The value shown in the form, with passwords masked.
    #[must_use]
    pub fn display_value(&self) -> String {
        match &self.schema.kind {
            FieldKind::Password => "*".repeat(self.value.chars().count()),
            FieldKind::Select(options) => options
                .get(self.option)
                .map(|opt| opt.label.clone())
                .unwrap_or_default(),
            _ => self.value.clone(),
        }
    }

    fn is_empty(&self) -> bool {
        match &self.schema.kind {
            FieldKind::Password => self.value.is_empty(),
            FieldKind::Select(_) => self.raw_value().is_empty(),
            _ => self.value.trim().is_empty(),
        }
    }
}

/// How empty optional fields appear in the save body.
///
/// Creates and full updates send explicit `null`s; partial updates (PATCH)
/// omit the key entirely so the backend leaves the stored value untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMode {
    /// Empty fields become `null`.
    NullWhenEmpty,
    /// Empty fields are left out of the body.
    OmitWhenEmpty,
}

/// Where and how a modal saves.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveSpec {
    /// HTTP method of the save request.
    pub method: Method,
    /// Collection path.
    pub path: &'static str,
    /// Record key appended as a path segment, for edits.
    pub key: Option<String>,
    /// Fixed trailing segment (e.g. `set-password`).
    pub action: Option<&'static str>,
    /// Empty-field handling for the body.
    pub body_mode: BodyMode,
}

impl SaveSpec {
    /// A POST to a collection path with explicit nulls for empties.
    #[must_use]
    pub const fn create(path: &'static str) -> Self {
        Self {
            method: Method::POST,
            path,
            key: None,
            action: None,
            body_mode: BodyMode::NullWhenEmpty,
        }
    }
}

/// Modal flavor: a labelled form or a yes/no confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalKind {
    /// Editable fields with one focused at a time.
    Form {
        /// Field states in display order.
        fields: Vec<FieldState>,
        /// Index of the focused field.
        focus: usize,
    },
    /// A message confirmed with Enter; the save carries no body.
    Confirm {
        /// Question shown to the operator.
        message: String,
    },
}

/// The open modal.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalState {
    /// Unique id; save outcomes are matched against it.
    pub id: u64,
    /// Title line.
    pub title: String,
    /// Form or confirmation content.
    pub kind: ModalKind,
    /// Save destination.
    pub save: SaveSpec,
    /// Set while the save request is in flight; suppresses further saves.
    pub saving: bool,
    /// Error slot below the actions, cleared on every save attempt.
    pub error: Option<String>,
}

impl ModalState {
    /// Opens a form modal.
    #[must_use]
    pub fn form(id: u64, title: impl Into<String>, fields: Vec<FieldState>, save: SaveSpec) -> Self {
        Self {
            id,
            title: title.into(),
            kind: ModalKind::Form { fields, focus: 0 },
            save,
            saving: false,
            error: None,
        }
    }

    /// Opens a confirmation modal.
    #[must_use]
    pub fn confirm(
        id: u64,
        title: impl Into<String>,
        message: impl Into<String>,
        save: SaveSpec,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            kind: ModalKind::Confirm {
                message: message.into(),
            },
            save,
            saving: false,
            error: None,
        }
    }

    /// First required field that is still empty, if any.
    #[must_use]
    pub fn missing_required(&self) -> Option<&'static str> {
        match &self.kind {
            ModalKind::Form { fields, .. } => fields
                .iter()
                .find(|f| f.schema.required && f.is_empty())
                .map(|f| f.schema.label),
            ModalKind::Confirm { .. } => None,
        }
    }

    /// Builds the save request from the current field values.
    #[must_use]
    pub fn build_request(&self) -> RequestSpec {
        let body = match &self.kind {
            ModalKind::Form { fields, .. } => {
                Some(Value::Object(build_body(fields, self.save.body_mode)))
            }
            ModalKind::Confirm { .. } => None,
        };

        RequestSpec {
            method: self.save.method.clone(),
            path: self.save.path,
            key: self.save.key.clone(),
            action: self.save.action,
            query: Vec::new(),
            body,
        }
    }

    /// Moves focus to the next field, wrapping.
    pub fn focus_next(&mut self) {
        if let ModalKind::Form { fields, focus } = &mut self.kind {
            if !fields.is_empty() {
                *focus = (*focus + 1) % fields.len();
            }
        }
    }

    /// Moves focus to the previous field, wrapping.
    pub fn focus_prev(&mut self) {
        if let ModalKind::Form { fields, focus } = &mut self.kind {
            if !fields.is_empty() {
                *focus = focus.checked_sub(1).unwrap_or(fields.len() - 1);
            }
        }
    }

    /// Appends a character to the focused text field.
    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.focused_field_mut() {
            if !matches!(field.schema.kind, FieldKind::Select(_)) {
                field.value.push(c);
            }
        }
    }

    /// Removes the last character of the focused text field.
    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            if !matches!(field.schema.kind, FieldKind::Select(_)) {
                field.value.pop();
            }
        }
    }

    /// Cycles the focused select field forward or backward.
    pub fn cycle_option(&mut self, forward: bool) {
        if let Some(field) = self.focused_field_mut() {
            if let FieldKind::Select(options) = &field.schema.kind {
                if options.is_empty() {
                    return;
                }
                field.option = if forward {
                    (field.option + 1) % options.len()
                } else {
                    field.option.checked_sub(1).unwrap_or(options.len() - 1)
                };
            }
        }
    }

    /// Overwrites a field's value by body key, used for async edit prefills.
    ///
    /// Select fields reposition on the matching option; text fields take the
    /// value directly. Unknown keys are ignored.
    pub fn prefill(&mut self, key: &str, value: &str) {
        if let ModalKind::Form { fields, .. } = &mut self.kind {
            if let Some(field) = fields.iter_mut().find(|f| f.schema.key == key) {
                match &field.schema.kind {
                    FieldKind::Select(options) => {
                        if let Some(idx) = options.iter().position(|opt| opt.value == value) {
                            field.option = idx;
                        }
                    }
                    _ => field.value = value.to_string(),
                }
            }
        }
    }

    fn focused_field_mut(&mut self) -> Option<&mut FieldState> {
        match &mut self.kind {
            ModalKind::Form { fields, focus } => fields.get_mut(*focus),
            ModalKind::Confirm { .. } => None,
        }
    }
}

/// Assembles the JSON body from field states.
fn build_body(fields: &[FieldState], mode: BodyMode) -> Map<String, Value> {
    let mut body = Map::new();

    for field in fields {
        let raw = match &field.schema.kind {
            FieldKind::Password => field.raw_value(),
            _ => field.raw_value().trim().to_string(),
        };

        if raw.is_empty() {
            if let Some(fallback) = field.schema.fallback {
                body.insert(
                    field.schema.key.to_string(),
                    Value::String(fallback.to_string()),
                );
            } else if mode == BodyMode::NullWhenEmpty {
                body.insert(field.schema.key.to_string(), Value::Null);
            }
            continue;
        }

        let value = match &field.schema.kind {
            FieldKind::Integer => raw.parse::<i64>().map_or(Value::Null, Value::from),
            FieldKind::Decimal => raw
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map_or(Value::Null, Value::Number),
            _ => Value::String(raw),
        };
        body.insert(field.schema.key.to_string(), value);
    }

    body
}
