//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState` snapshots and consumed by the
//! renderer. They contain no business logic, only display-ready data:
//! windowed table rows, highlight ranges, pre-formatted hints.

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UiViewModel {
    /// Top header line.
    pub header: HeaderInfo,

    /// Navigation bar items in hotkey order.
    pub nav: Vec<NavItem>,

    /// Section card title and add hint.
    pub card: CardInfo,

    /// Warehouse selector line (stock section only).
    pub selector: Option<SelectorView>,

    /// Table content; `None` when a placeholder replaces it.
    pub table: Option<TableView>,

    /// Text replacing the table body.
    pub placeholder: Option<String>,

    /// Red error slot under the content.
    pub error: Option<String>,

    /// Filter bar (filter mode only).
    pub filter_bar: Option<FilterBarInfo>,

    /// Modal overlay, drawn on top of everything.
    pub modal: Option<ModalView>,

    /// Bottom keybinding hints.
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Application title.
    pub title: String,
    /// Operator greeting, once the identity is known.
    pub identity: Option<String>,
}

/// One navigation bar entry.
#[derive(Debug, Clone)]
pub struct NavItem {
    /// Section title.
    pub title: &'static str,
    /// 1-based hotkey digit.
    pub hotkey: usize,
    /// Whether this is the active section.
    pub active: bool,
}

/// Section card information.
#[derive(Debug, Clone)]
pub struct CardInfo {
    /// Card title with row count, e.g. " Товары (12) ".
    pub title: String,
    /// Add-action hint when creation is available to this operator.
    pub add_hint: Option<String>,
    /// Whether a loader request is in flight.
    pub loading: bool,
}

/// Warehouse selector line.
#[derive(Debug, Clone)]
pub struct SelectorView {
    /// Label of the highlighted warehouse, if any are loaded.
    pub current: Option<String>,
    /// Whether the dictionary load has completed.
    pub loaded: bool,
}

/// Windowed table content.
#[derive(Debug, Clone)]
pub struct TableView {
    /// Column header titles.
    pub columns: Vec<&'static str>,
    /// Visible rows.
    pub rows: Vec<RowView>,
    /// Total rows in the filtered view (for the card title count).
    pub total: usize,
}

/// One visible table row.
#[derive(Debug, Clone)]
pub struct RowView {
    /// Cell texts, one per column.
    pub cells: Vec<String>,
    /// Whether this row is selected.
    pub is_selected: bool,
    /// Filter match ranges within the first cell, in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Filter bar display information.
#[derive(Debug, Clone)]
pub struct FilterBarInfo {
    /// Current filter query.
    pub query: String,
}

/// Modal overlay content.
#[derive(Debug, Clone)]
pub struct ModalView {
    /// Title line.
    pub title: String,
    /// Form fields or a confirmation message.
    pub body: ModalBodyView,
    /// Error slot text.
    pub error: Option<String>,
    /// Whether the save request is in flight.
    pub saving: bool,
}

/// Modal body flavor.
#[derive(Debug, Clone)]
pub enum ModalBodyView {
    /// Labelled fields.
    Form {
        /// Field lines in display order.
        fields: Vec<FieldView>,
    },
    /// A yes/no question.
    Confirm {
        /// Message text.
        message: String,
    },
}

/// One rendered form field.
#[derive(Debug, Clone)]
pub struct FieldView {
    /// Field label.
    pub label: &'static str,
    /// Display value (masked for passwords, option label for selects).
    pub value: String,
    /// Whether this field has focus.
    pub focused: bool,
    /// Whether the field cycles options instead of accepting text.
    pub is_select: bool,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}
