//! REST client layer: request specs, the HTTP client and the error envelope.

pub mod client;
pub mod envelope;

pub use client::{decode_response, ApiClient, RequestSpec};
pub use envelope::{ApiFailure, TRANSPORT_STATUS};
