//! Error types for the SDS console.
//!
//! This module defines the centralized error type [`ConsoleError`] and a type alias
//! [`Result`] for convenient error handling throughout the application. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Note that a non-2xx API response is *not* a `ConsoleError`: it is an
//! [`ApiFailure`](crate::api::ApiFailure) envelope, a protocol value routed back to
//! the UI and rendered into an error slot. `ConsoleError` covers the program's own
//! failures (I/O, configuration, storage, terminal setup).

use thiserror::Error;

/// The main error type for console operations.
///
/// This enum consolidates all error conditions that can occur outside the API
/// request/response protocol, from token storage to configuration issues. Most
/// variants wrap underlying errors from external crates using `#[from]` for
/// automatic conversion.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Token storage operation failed.
    ///
    /// Occurs when reading from or writing to the token store fails.
    /// The string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when the configuration file or the base URL cannot be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP client could not be constructed or a URL could not be built.
    ///
    /// Failures of individual requests travel through the envelope channel
    /// instead; this variant is for setup-time problems only.
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Communication with the background API worker failed.
    ///
    /// Occurs when the worker thread has shut down and a request can no longer
    /// be delivered.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

/// A specialized `Result` type for console operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;
