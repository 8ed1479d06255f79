//! Token persistence between console runs.

pub mod backend;
pub mod file;

pub use backend::TokenStore;
pub use file::FileTokenStore;
