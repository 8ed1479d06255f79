//! Background API execution: the worker thread and its message protocol.

pub mod handler;
pub mod messages;

pub use handler::ApiWorker;
pub use messages::{ApiOutcome, ApiRequest, PreludePart, RequestTag};
