//! Host integration: file locations.

pub mod paths;
