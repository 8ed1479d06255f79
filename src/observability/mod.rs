//! Logging initialization.

pub mod init;

pub use init::init_tracing;
