//! HTTP client for the SDS REST backend.
//!
//! [`ApiClient`] is a thin wrapper over `reqwest` that attaches the bearer
//! token and JSON content type, reads every response body as text, and
//! normalizes it through [`decode_response`]: 2xx yields the parsed body (or
//! `Null` when empty), anything else becomes an [`ApiFailure`] envelope. There
//! are no retries, no request timeouts and no caching; staleness and failure
//! handling belong to the callers.

use crate::api::envelope::ApiFailure;
use crate::domain::error::{ConsoleError, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use url::Url;

/// A single API call, described declaratively.
///
/// `key` is appended as its own percent-encoded path segment
/// (`/api/v1/users/{login}`), `action` as a fixed trailing segment
/// (`set-password`). Query parameters and the JSON body are optional.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// HTTP method.
    pub method: Method,
    /// Collection path starting with `/`, e.g. `/api/v1/dictionary/products`.
    pub path: &'static str,
    /// Optional record key appended as a path segment.
    pub key: Option<String>,
    /// Optional fixed action segment appended after the key.
    pub action: Option<&'static str>,
    /// Query string pairs.
    pub query: Vec<(String, String)>,
    /// JSON request body.
    pub body: Option<Value>,
}

impl RequestSpec {
    /// A bare GET of a collection path.
    #[must_use]
    pub const fn get(path: &'static str) -> Self {
        Self {
            method: Method::GET,
            path,
            key: None,
            action: None,
            query: Vec::new(),
            body: None,
        }
    }
}

/// Authenticated client bound to one base URL and (optionally) one token.
///
/// The token is `None` only for the login call itself; every other request
/// carries `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Builds a client for the given backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base: Url, token: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ConsoleError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base, token })
    }

    /// Resolves the full endpoint URL for a request.
    fn endpoint(&self, spec: &RequestSpec) -> Result<Url> {
        let mut url = self
            .base
            .join(spec.path)
            .map_err(|e| ConsoleError::Http(format!("invalid path {}: {e}", spec.path)))?;

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ConsoleError::Http("base URL cannot carry paths".to_string()))?;
            if let Some(key) = &spec.key {
                segments.push(key);
            }
            if let Some(action) = spec.action {
                segments.push(action);
            }
        }

        for (name, value) in &spec.query {
            url.query_pairs_mut().append_pair(name, value);
        }

        Ok(url)
    }

    /// Executes a request and normalizes the response.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiFailure`] envelope for non-2xx responses, and the
    /// transport envelope (`status = 0`) when the request never produced an
    /// HTTP response.
    pub async fn call(&self, spec: &RequestSpec) -> std::result::Result<Value, ApiFailure> {
        let url = match self.endpoint(spec) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(path = spec.path, error = %e, "failed to build request URL");
                return Err(ApiFailure::transport());
            }
        };

        tracing::debug!(method = %spec.method, url = %url, "api call");

        let mut request = self
            .http
            .request(spec.method.clone(), url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = &spec.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(path = spec.path, error = %e, "transport failure");
            ApiFailure::transport()
        })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            tracing::warn!(path = spec.path, error = %e, "failed to read response body");
            ApiFailure::transport()
        })?;

        decode_response(status, &text)
    }
}

/// Normalizes a raw HTTP response into the console's protocol.
///
/// The body is parsed as JSON when non-empty; parse failures degrade to no
/// data rather than erroring. 2xx responses yield the parsed body (or `Null`),
/// everything else yields the `{ status, data }` envelope.
pub fn decode_response(status: u16, text: &str) -> std::result::Result<Value, ApiFailure> {
    let data: Option<Value> = if text.is_empty() {
        None
    } else {
        serde_json::from_str(text).ok()
    };

    if (200..300).contains(&status) {
        Ok(data.unwrap_or(Value::Null))
    } else {
        Err(ApiFailure { status, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_yields_parsed_body() {
        let body = r#"[{"code": "P1"}]"#;
        assert_eq!(decode_response(200, body).unwrap(), json!([{"code": "P1"}]));
    }

    #[test]
    fn empty_or_invalid_success_body_yields_null() {
        assert_eq!(decode_response(204, "").unwrap(), Value::Null);
        assert_eq!(decode_response(200, "not json").unwrap(), Value::Null);
    }

    #[test]
    fn failure_carries_status_and_parsed_body() {
        let err = decode_response(403, r#"{"detail": "Недостаточно прав"}"#).unwrap_err();
        assert_eq!(err.status, 403);
        assert_eq!(err.data, Some(json!({"detail": "Недостаточно прав"})));
    }

    #[test]
    fn failure_without_usable_body_has_no_data() {
        let err = decode_response(500, "").unwrap_err();
        assert_eq!(err.status, 500);
        assert_eq!(err.data, None);

        let err = decode_response(502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err.data, None);
    }

    #[test]
    fn endpoint_encodes_keys_as_path_segments() {
        let client = ApiClient::new(
            Url::parse("http://127.0.0.1:8000").unwrap(),
            Some("t".to_string()),
        )
        .unwrap();

        let spec = RequestSpec {
            method: Method::POST,
            path: "/api/v1/users",
            key: Some("иванов/ooo".to_string()),
            action: Some("set-password"),
            query: vec![],
            body: None,
        };

        let url = client.endpoint(&spec).unwrap();
        assert!(url.path().starts_with("/api/v1/users/"));
        assert!(url.path().ends_with("/set-password"));
        // The slash inside the key must not create an extra segment.
        assert_eq!(url.path_segments().unwrap().count(), 5);
    }

    #[test]
    fn endpoint_appends_query_pairs() {
        let client =
            ApiClient::new(Url::parse("http://127.0.0.1:8000").unwrap(), None).unwrap();

        let spec = RequestSpec {
            method: Method::GET,
            path: "/api/v1/stock",
            key: None,
            action: None,
            query: vec![("warehouse_code".to_string(), "СКЛ 1".to_string())],
            body: None,
        };

        let url = client.endpoint(&spec).unwrap();
        assert_eq!(url.query(), Some("warehouse_code=%D0%A1%D0%9A%D0%9B+1"));
    }
}
