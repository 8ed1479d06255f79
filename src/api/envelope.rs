//! The error envelope produced by failed API calls.
//!
//! Every non-2xx response and every transport failure is normalized into an
//! [`ApiFailure`] carrying the HTTP status and the parsed body (if the body
//! was valid JSON). The UI renders failures through the message helpers here;
//! nothing else in the crate interprets backend errors.

use serde_json::Value;

/// Status code used for failures that never produced an HTTP response
/// (connection refused, DNS, timeouts at the socket level).
pub const TRANSPORT_STATUS: u16 = 0;

/// A failed API call, normalized to `{ status, data }`.
///
/// `data` is the response body parsed as JSON, or `None` when the body was
/// empty, unparseable, or the failure happened below HTTP.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiFailure {
    /// HTTP status code, or [`TRANSPORT_STATUS`] for transport failures.
    pub status: u16,
    /// Parsed response body, when one existed and was valid JSON.
    pub data: Option<Value>,
}

impl ApiFailure {
    /// A failure with no HTTP response at all.
    #[must_use]
    pub const fn transport() -> Self {
        Self {
            status: TRANSPORT_STATUS,
            data: None,
        }
    }

    /// The `detail` field of the body, if the body is an object carrying one.
    #[must_use]
    pub fn detail(&self) -> Option<&Value> {
        self.data.as_ref().and_then(|data| data.get("detail"))
    }

    /// Human-readable message for a failed modal save.
    ///
    /// A string `detail` is shown verbatim (backends return validation text in
    /// Russian), any other present `detail` is serialized to JSON, and
    /// everything else collapses to the generic "Ошибка".
    #[must_use]
    pub fn detail_message(&self) -> String {
        match self.detail() {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => "Ошибка".to_string(),
        }
    }

    /// Human-readable message for a failed section load.
    ///
    /// Same verbatim rule for string details; beyond that the split is by
    /// status: 403 is an access refusal whatever the body looks like,
    /// anything else is a plain load failure.
    #[must_use]
    pub fn section_message(&self) -> String {
        match self.detail() {
            Some(Value::String(text)) => text.clone(),
            _ if self.status == 403 => "Ошибка доступа".to_string(),
            _ => "Ошибка загрузки".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_detail_is_shown_verbatim() {
        let failure = ApiFailure {
            status: 400,
            data: Some(json!({"detail": "Логин уже занят"})),
        };
        assert_eq!(failure.detail_message(), "Логин уже занят");
        assert_eq!(failure.section_message(), "Логин уже занят");
    }

    #[test]
    fn structured_detail_is_serialized_for_modals() {
        let failure = ApiFailure {
            status: 422,
            data: Some(json!({"detail": [{"loc": ["body", "login"], "msg": "field required"}]})),
        };
        assert_eq!(
            failure.detail_message(),
            r#"[{"loc":["body","login"],"msg":"field required"}]"#
        );
        assert_eq!(failure.section_message(), "Ошибка загрузки");
    }

    #[test]
    fn access_refusals_are_recognized_by_status_alone() {
        // Some proxies strip the body from a 403; the refusal must still be
        // distinguishable from a server failure.
        let bare_403 = ApiFailure { status: 403, data: None };
        assert_eq!(bare_403.section_message(), "Ошибка доступа");

        let bare_500 = ApiFailure { status: 500, data: None };
        assert_eq!(bare_500.section_message(), "Ошибка загрузки");
        assert_ne!(bare_403.section_message(), bare_500.section_message());

        // A string detail still wins on a 403.
        let detailed = ApiFailure {
            status: 403,
            data: Some(json!({"detail": "Недостаточно прав"})),
        };
        assert_eq!(detailed.section_message(), "Недостаточно прав");
    }

    #[test]
    fn missing_detail_falls_back_to_generic_messages() {
        let failure = ApiFailure {
            status: 500,
            data: Some(json!({"message": "boom"})),
        };
        assert_eq!(failure.detail_message(), "Ошибка");

        let transport = ApiFailure::transport();
        assert_eq!(transport.status, TRANSPORT_STATUS);
        assert_eq!(transport.detail_message(), "Ошибка");
        assert_eq!(transport.section_message(), "Ошибка загрузки");
    }
}
