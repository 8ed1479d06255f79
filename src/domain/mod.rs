//! Core domain types: errors, backend records and operator sessions.

pub mod error;
pub mod record;
pub mod session;

pub use error::{ConsoleError, Result};
pub use record::Record;
pub use session::{can_manage, Session, UserIdentity};
