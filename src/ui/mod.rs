//! Terminal rendering: themes, view models and the ANSI frame renderer.

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::UiViewModel;
