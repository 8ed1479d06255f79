//! Per-section transient state.
//!
//! Activating a section replaces this state wholesale and bumps the global
//! generation counter, so responses belonging to a previously shown section
//! can be recognized and dropped. Refreshing the live section reuses the
//! current generation: concurrent refreshes of the same section are not
//! serialized, both render in arrival order.

use crate::app::modal::SelectOption;
use crate::domain::Record;
use crate::sections::Resource;

/// The warehouse selector of the stock section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorState {
    /// Options loaded from the warehouse dictionary.
    pub options: Vec<SelectOption>,
    /// Index of the highlighted option.
    pub selected: usize,
    /// Whether the dictionary load has completed.
    pub loaded: bool,
}

impl SelectorState {
    /// An empty selector awaiting its dictionary.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            options: Vec::new(),
            selected: 0,
            loaded: false,
        }
    }

    /// Value of the highlighted option, if any.
    #[must_use]
    pub fn selected_value(&self) -> Option<&str> {
        self.options.get(self.selected).map(|opt| opt.value.as_str())
    }

    /// Moves the highlight, wrapping.
    pub fn cycle(&mut self, forward: bool) {
        if self.options.is_empty() {
            return;
        }
        self.selected = if forward {
            (self.selected + 1) % self.options.len()
        } else {
            self.selected.checked_sub(1).unwrap_or(self.options.len() - 1)
        };
    }
}

impl Default for SelectorState {
    fn default() -> Self {
        Self::new()
    }
}

/// State of the active section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionState {
    /// Which section is shown.
    pub resource: Resource,

    /// Generation stamped into loader requests; changes only on activation.
    pub generation: u64,

    /// Loaded rows.
    pub rows: Vec<Record>,

    /// Red error slot under the table (load failures, refused actions).
    pub error: Option<String>,

    /// Text replacing the table body (empty collections, access notices,
    /// stock's no-rows message). `None` renders the table.
    pub placeholder: Option<String>,

    /// Selected row index within the filtered view.
    pub selected: usize,

    /// Set between issuing the loader and its outcome.
    pub loading: bool,

    /// Warehouse selector, present for the stock section only.
    pub selector: Option<SelectorState>,
}

impl SectionState {
    /// Fresh state for an activated section.
    #[must_use]
    pub fn new(resource: Resource, generation: u64) -> Self {
        Self {
            resource,
            generation,
            rows: Vec::new(),
            error: None,
            placeholder: None,
            selected: 0,
            loading: false,
            selector: (resource == Resource::Stock).then(SelectorState::new),
        }
    }

    /// Replaces the rows after a successful load.
    pub fn set_rows(&mut self, rows: Vec<Record>) {
        let empty_text = self.resource.spec().empty_text;
        self.placeholder = rows.is_empty().then(|| empty_text.to_string());
        self.rows = rows;
        self.error = None;
        self.loading = false;
        self.selected = 0;
    }

    /// Clears the content and shows a placeholder notice.
    pub fn set_placeholder(&mut self, text: impl Into<String>) {
        self.rows.clear();
        self.placeholder = Some(text.into());
        self.error = None;
        self.loading = false;
        self.selected = 0;
    }

    /// Clears the content and shows an error in the red slot.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.rows.clear();
        self.placeholder = None;
        self.error = Some(message.into());
        self.loading = false;
        self.selected = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_stock_gets_a_selector() {
        assert!(SectionState::new(Resource::Stock, 1).selector.is_some());
        assert!(SectionState::new(Resource::Users, 1).selector.is_none());
    }

    #[test]
    fn empty_rows_show_the_section_empty_text() {
        let mut section = SectionState::new(Resource::Products, 1);
        section.set_rows(vec![]);
        assert_eq!(section.placeholder.as_deref(), Some("Нет товаров."));

        section.set_rows(vec![Record::from_value(json!({"code": "P1"})).unwrap()]);
        assert_eq!(section.placeholder, None);
        assert_eq!(section.rows.len(), 1);
    }

    #[test]
    fn selector_cycle_wraps() {
        let mut selector = SelectorState::new();
        selector.cycle(true);
        assert_eq!(selector.selected, 0);

        selector.options = vec![SelectOption::plain("W1"), SelectOption::plain("W2")];
        selector.cycle(false);
        assert_eq!(selector.selected_value(), Some("W2"));
        selector.cycle(true);
        assert_eq!(selector.selected_value(), Some("W1"));
    }
}
