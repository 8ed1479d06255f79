//! Actions representing side effects to be executed by the terminal shim.
//!
//! The event handler returns a `Vec<Action>` after processing each event.
//! Actions are the boundary between the pure state machine and the effectful
//! world: API calls go to the worker, session transitions go to the shim's
//! outer loop.

use crate::net::ApiRequest;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Submits a request to the background API worker.
    CallApi(ApiRequest),

    /// Exits the console.
    Quit,

    /// Clears the stored token and returns to the login prompt.
    ///
    /// Explicit logout; no server call is made.
    Logout,

    /// Clears the stored token and returns to the login prompt because the
    /// bootstrap identity check failed. Never surfaced as an in-page error.
    ReturnToLogin,
}
