//! Opaque backend records.
//!
//! The console is data-model-agnostic: every entity row is a JSON object whose
//! fields are primitives (string, number, boolean or null). [`Record`] wraps such
//! an object and provides the handful of typed accessors the table renderers and
//! form prefills need. No entity-specific invariants are enforced client-side.

use serde_json::{Map, Value};

/// A single backend record: a mapping from field name to primitive value.
///
/// Records are produced by decoding list responses and are never validated
/// beyond being JSON objects; unknown fields are carried along untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Wraps a JSON value, returning `None` unless it is an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Decodes a list response into records, skipping non-object elements.
    ///
    /// Returns `None` when the body is not an array at all, which callers
    /// treat as a load failure rather than an empty collection.
    #[must_use]
    pub fn list_from_value(value: &Value) -> Option<Vec<Self>> {
        value.as_array().map(|items| {
            items
                .iter()
                .filter_map(|item| Self::from_value(item.clone()))
                .collect()
        })
    }

    /// Returns the raw field value, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a string field, or `""` for anything that is not a string.
    #[must_use]
    pub fn text(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or("")
    }

    /// Returns the record's identity under `key` as an owned string.
    ///
    /// Backends key some collections by string codes and others by numeric ids;
    /// both are accepted here.
    #[must_use]
    pub fn key(&self, key: &str) -> Option<String> {
        match self.0.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Renders a field for display in a table cell.
    ///
    /// Strings pass through, numbers are formatted, booleans become "Да"/"Нет"
    /// and null/absent fields render as an empty cell.
    #[must_use]
    pub fn display(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(true)) => "Да".to_string(),
            Some(Value::Bool(false)) => "Нет".to_string(),
            _ => String::new(),
        }
    }

    /// Renders a field as an editable form value (no boolean coercion).
    #[must_use]
    pub fn edit_value(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_accepts_only_objects() {
        assert!(Record::from_value(json!({"a": 1})).is_some());
        assert!(Record::from_value(json!([1, 2])).is_none());
        assert!(Record::from_value(json!(null)).is_none());
    }

    #[test]
    fn list_from_value_distinguishes_non_arrays() {
        assert!(Record::list_from_value(&json!(null)).is_none());
        assert!(Record::list_from_value(&json!({"detail": "x"})).is_none());
        let list = Record::list_from_value(&json!([{"a": 1}, 2, {"b": 3}])).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn display_coerces_primitives() {
        let rec = Record::from_value(json!({
            "code": "P1",
            "weight_g": 250,
            "has_password": true,
            "price": null
        }))
        .unwrap();
        assert_eq!(rec.display("code"), "P1");
        assert_eq!(rec.display("weight_g"), "250");
        assert_eq!(rec.display("has_password"), "Да");
        assert_eq!(rec.display("price"), "");
        assert_eq!(rec.display("missing"), "");
    }

    #[test]
    fn key_accepts_string_and_number() {
        let rec = Record::from_value(json!({"id": 42, "code": "W1"})).unwrap();
        assert_eq!(rec.key("id").as_deref(), Some("42"));
        assert_eq!(rec.key("code").as_deref(), Some("W1"));
        assert_eq!(rec.key("absent"), None);
    }
}
