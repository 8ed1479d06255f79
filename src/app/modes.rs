//! Input mode state types.
//!
//! Keybinding interpretation depends on two things: whether a modal is open
//! (checked directly on `AppState`) and, outside modals, the [`InputMode`]
//! here. Filter mode mirrors the two-focus search of classic fuzzy pickers:
//! typing edits the query, navigating moves through the filtered rows.

/// Focus state within filter mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterFocus {
    /// The query line is being edited; characters extend the filter.
    Typing,

    /// The filtered rows are being navigated; `/` returns to typing.
    Navigating,
}

/// Current input handling mode outside modals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    ///
    /// Available keybindings: j/k (rows), 1-7 and h/l (sections), a/e/p/d
    /// (actions), r (refresh), / (filter), Enter (stock load), q (quit).
    Normal,

    /// Active row filter with a focus state.
    Filter(FilterFocus),
}
