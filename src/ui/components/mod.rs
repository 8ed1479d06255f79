//! Individual UI component renderers.
//!
//! Every component emits a positioned ANSI fragment; the renderer decides the
//! layout and concatenates the fragments into one frame.

pub mod filter;
pub mod footer;
pub mod header;
pub mod modal;
pub mod nav;
pub mod notice;
pub mod table;
