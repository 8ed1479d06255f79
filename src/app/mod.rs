//! Application state machine: state, events, modals and input modes.

pub mod actions;
pub mod handler;
pub mod modal;
pub mod modes;
pub mod section;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modal::{FieldKind, FieldSchema, FieldState, ModalKind, ModalState, SelectOption};
pub use modes::{FilterFocus, InputMode};
pub use section::{SectionState, SelectorState};
pub use state::{AppState, PreludeState};
