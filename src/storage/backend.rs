//! Token persistence trait.

use crate::domain::error::Result;

/// Storage for the bearer token between console runs.
///
/// The trait keeps the session plumbing testable without touching the
/// filesystem.
pub trait TokenStore {
    /// Loads the stored token, `None` when no usable token exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage is unreadable.
    fn load(&self) -> Result<Option<String>>;

    /// Persists the token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be written durably.
    fn save(&mut self, token: &str) -> Result<()>;

    /// Removes the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails for reasons other than the
    /// token being absent.
    fn clear(&mut self) -> Result<()>;
}
