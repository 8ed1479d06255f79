//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for all transient UI state: the
//! session, the active section, the (at most one) open modal, the input mode
//! and the row filter. The event handler mutates it; `compute_viewmodel`
//! snapshots it into a renderable form, handling windowing and filter match
//! highlighting.

use crate::app::modal::{FieldKind, ModalKind, ModalState};
use crate::app::modes::{FilterFocus, InputMode};
use crate::app::section::SectionState;
use crate::domain::{can_manage, Record, Session};
use crate::sections::Resource;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CardInfo, FieldView, FilterBarInfo, FooterInfo, HeaderInfo, ModalBodyView, ModalView, NavItem,
    RowView, SelectorView, TableView, UiViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Buffer for the three dictionaries needed by the operation-create form.
///
/// The loads run concurrently; the form opens only once all three parts have
/// arrived. A failed part discards the whole buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct PreludeState {
    /// Id matched against incoming prelude outcomes.
    pub id: u64,
    /// Operation types, once loaded.
    pub types: Option<Vec<Record>>,
    /// Products, once loaded.
    pub products: Option<Vec<Record>>,
    /// Customers, once loaded.
    pub customers: Option<Vec<Record>>,
}

impl PreludeState {
    /// An empty buffer with the given id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            types: None,
            products: None,
            customers: None,
        }
    }

    /// Whether all three dictionaries have arrived.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.types.is_some() && self.products.is_some() && self.customers.is_some()
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Authenticated session, populated by the identity outcome.
    pub session: Option<Session>,

    /// State of the active section. Replaced wholesale on navigation.
    pub section: SectionState,

    /// The open modal, if any. Opening replaces atomically.
    pub modal: Option<ModalState>,

    /// Current input handling mode outside modals.
    pub input_mode: InputMode,

    /// Current row filter query.
    pub filter_query: String,

    /// Indices into `section.rows` passing the cap and the filter.
    pub filtered_rows: Vec<usize>,

    /// Buffered operation-create dictionaries, while the prelude is running.
    pub pending_prelude: Option<PreludeState>,

    /// Color scheme for rendering.
    pub theme: Theme,

    generation_counter: u64,
    modal_seq: u64,
}

impl AppState {
    /// Creates the initial state: Users section pending its first load.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            session: None,
            section: SectionState::new(Resource::Users, 0),
            modal: None,
            input_mode: InputMode::Normal,
            filter_query: String::new(),
            filtered_rows: Vec::new(),
            pending_prelude: None,
            theme,
            generation_counter: 0,
            modal_seq: 0,
        }
    }

    /// Stamps out the next section generation.
    pub fn next_generation(&mut self) -> u64 {
        self.generation_counter += 1;
        self.generation_counter
    }

    /// Allocates a unique modal id from the creation timestamp and a
    /// per-run sequence.
    pub fn allocate_modal_id(&mut self) -> u64 {
        self.modal_seq += 1;
        let millis = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
        millis.wrapping_mul(1000).wrapping_add(self.modal_seq)
    }

    /// Moves row selection down by one, wrapping.
    pub fn move_selection_down(&mut self) {
        if self.filtered_rows.is_empty() {
            return;
        }
        self.section.selected = (self.section.selected + 1) % self.filtered_rows.len();
    }

    /// Moves row selection up by one, wrapping.
    pub fn move_selection_up(&mut self) {
        if self.filtered_rows.is_empty() {
            return;
        }
        self.section.selected = self
            .section
            .selected
            .checked_sub(1)
            .unwrap_or(self.filtered_rows.len() - 1);
    }

    /// The selected record within the filtered view, if any.
    #[must_use]
    pub fn selected_record(&self) -> Option<&Record> {
        self.filtered_rows
            .get(self.section.selected)
            .and_then(|&idx| self.section.rows.get(idx))
    }

    /// Recomputes the filtered view from the loaded rows.
    ///
    /// The row cap applies before filtering (the operations journal renders
    /// at most 100 rows); the filter fuzzy-matches every whitespace token of
    /// the query against the first column of each row. The selection is
    /// clamped to the new bounds.
    pub fn apply_row_filter(&mut self) {
        let spec = self.section.resource.spec();
        let cap = spec.row_cap.unwrap_or(usize::MAX);
        let key_field = spec.columns.first().map_or(spec.key_field, |c| c.field);

        let tokens: Vec<String> = self
            .filter_query
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        let matcher = (!tokens.is_empty()).then(SkimMatcherV2::default);

        self.filtered_rows = self
            .section
            .rows
            .iter()
            .enumerate()
            .take(cap)
            .filter(|(_, record)| {
                matcher.as_ref().map_or(true, |m| {
                    let cell = record.display(key_field).to_lowercase();
                    tokens.iter().all(|token| m.fuzzy_match(&cell, token).is_some())
                })
            })
            .map(|(idx, _)| idx)
            .collect();

        if self.filtered_rows.is_empty() {
            self.section.selected = 0;
        } else {
            self.section.selected = self.section.selected.min(self.filtered_rows.len() - 1);
        }
    }

    /// Computes a renderable view model for the given terminal size.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, _cols: usize) -> UiViewModel {
        UiViewModel {
            header: self.compute_header(),
            nav: self.compute_nav(),
            card: self.compute_card(),
            selector: self.compute_selector(),
            table: self.compute_table(rows),
            placeholder: self.section.placeholder.clone(),
            error: self.section.error.clone(),
            filter_bar: self.compute_filter_bar(),
            modal: self.modal.as_ref().map(Self::compute_modal),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: " SDS Console ".to_string(),
            identity: self.session.as_ref().map(Session::display_name),
        }
    }

    fn compute_nav(&self) -> Vec<NavItem> {
        Resource::ALL
            .iter()
            .enumerate()
            .map(|(idx, resource)| NavItem {
                title: resource.spec().title,
                hotkey: idx + 1,
                active: *resource == self.section.resource,
            })
            .collect()
    }

    fn compute_card(&self) -> CardInfo {
        let spec = self.section.resource.spec();
        let add_hint = spec
            .add_label
            .filter(|_| can_manage(self.session.as_ref(), self.section.resource))
            .map(|label| format!("a: {label}"));

        CardInfo {
            title: format!(" {} ({}) ", spec.title, self.filtered_rows.len()),
            add_hint,
            loading: self.section.loading,
        }
    }

    fn compute_selector(&self) -> Option<SelectorView> {
        self.section.selector.as_ref().map(|selector| SelectorView {
            current: selector
                .options
                .get(selector.selected)
                .map(|opt| opt.label.clone()),
            loaded: selector.loaded,
        })
    }

    fn compute_table(&self, rows: usize) -> Option<TableView> {
        if self.section.placeholder.is_some() || self.filtered_rows.is_empty() {
            return None;
        }

        let spec = self.section.resource.spec();
        let available = self.calculate_available_rows(rows);

        let mut visible_start = self.section.selected.saturating_sub(available / 2);
        let visible_end = (visible_start + available).min(self.filtered_rows.len());
        if visible_end - visible_start < available && self.filtered_rows.len() >= available {
            visible_start = visible_end.saturating_sub(available);
        }

        let matcher = (!self.filter_query.is_empty()).then(SkimMatcherV2::default);

        let key_field = spec.columns.first().map_or(spec.key_field, |c| c.field);
        let table_rows = self.filtered_rows[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, &row_idx)| {
                let absolute_idx = visible_start + relative_idx;
                let record = &self.section.rows[row_idx];
                let highlight_ranges = matcher.as_ref().map_or_else(Vec::new, |m| {
                    self.compute_highlight_ranges(&record.display(key_field), m)
                });
                RowView {
                    cells: spec
                        .columns
                        .iter()
                        .map(|column| record.display(column.field))
                        .collect(),
                    is_selected: absolute_idx == self.section.selected,
                    highlight_ranges,
                }
            })
            .collect();

        Some(TableView {
            columns: spec.columns.iter().map(|column| column.title).collect(),
            rows: table_rows,
            total: self.filtered_rows.len(),
        })
    }

    /// Coalesces fuzzy match indices into contiguous character ranges.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        let Some((_score, indices)) = matcher.fuzzy_indices(text, &self.filter_query) else {
            return vec![];
        };

        let mut ranges = Vec::new();
        let mut start = None;
        let mut prev = None;

        for &idx in &indices {
            match (start, prev) {
                (None, _) => {
                    start = Some(idx);
                    prev = Some(idx);
                }
                (Some(_), Some(p)) if idx == p + 1 => {
                    prev = Some(idx);
                }
                (Some(s), Some(p)) => {
                    ranges.push((s, p + 1));
                    start = Some(idx);
                    prev = Some(idx);
                }
                _ => {}
            }
        }

        if let (Some(s), Some(p)) = (start, prev) {
            ranges.push((s, p + 1));
        }

        ranges
    }

    fn compute_filter_bar(&self) -> Option<FilterBarInfo> {
        matches!(self.input_mode, InputMode::Filter(_)).then(|| FilterBarInfo {
            query: self.filter_query.clone(),
        })
    }

    fn compute_modal(modal: &ModalState) -> ModalView {
        let body = match &modal.kind {
            ModalKind::Form { fields, focus } => ModalBodyView::Form {
                fields: fields
                    .iter()
                    .enumerate()
                    .map(|(idx, field)| FieldView {
                        label: field.schema.label,
                        value: field.display_value(),
                        focused: idx == *focus,
                        is_select: matches!(field.schema.kind, FieldKind::Select(_)),
                    })
                    .collect(),
            },
            ModalKind::Confirm { message } => ModalBodyView::Confirm {
                message: message.clone(),
            },
        };

        ModalView {
            title: modal.title.clone(),
            body,
            error: modal.error.clone(),
            saving: modal.saving,
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if let Some(modal) = &self.modal {
            match modal.kind {
                ModalKind::Form { .. } => {
                    "Tab/↓↑: поле  ←/→: значение  Enter: сохранить  Esc: отмена".to_string()
                }
                ModalKind::Confirm { .. } => "Enter: подтвердить  Esc: отмена".to_string(),
            }
        } else {
            match (self.input_mode, self.section.resource) {
                (InputMode::Filter(FilterFocus::Typing), _) => {
                    "Esc: сброс  Enter: к строкам  Текст: фильтр".to_string()
                }
                (InputMode::Filter(FilterFocus::Navigating), _) => {
                    "Esc: сброс  /: изменить фильтр  j/k: строки".to_string()
                }
                (InputMode::Normal, Resource::Stock) => {
                    "j/k: склад  Enter: показать остатки  1-7: разделы  r: обновить  q: выход"
                        .to_string()
                }
                // Must stay under 80 characters so an 80-column terminal
                // shows the whole hint.
                (InputMode::Normal, _) => {
                    "1-7: разделы  a: новый  e: изменить  r: обновить  /: фильтр  L: выйти  q: выход"
                        .to_string()
                }
            }
        };

        FooterInfo { keybindings }
    }

    /// Rows available to the table after subtracting UI chrome.
    fn calculate_available_rows(&self, total_rows: usize) -> usize {
        // header, nav, separator, card title, add hint, table header,
        // error slot, footer
        let mut chrome = 8;
        if self.section.selector.is_some() {
            chrome += 1;
        }
        if matches!(self.input_mode, InputMode::Filter(_)) {
            chrome += 1;
        }
        total_rows.saturating_sub(chrome).max(1)
    }
}
