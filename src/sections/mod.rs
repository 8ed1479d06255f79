//! The seven entity sections.
//!
//! Every section is the same framework parameterized differently: a list
//! endpoint, a column set, a role gate and a handful of form builders. The
//! per-entity modules hold the parameterizations; nothing in them contains
//! control flow beyond assembling field schemas.

pub mod customers;
pub mod operations;
pub mod orders;
pub mod products;
pub mod stock;
pub mod users;
pub mod warehouses;

/// The sections of the console, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Operator accounts (admin-only management).
    Users,
    /// Product dictionary (admin-only management).
    Products,
    /// Warehouse dictionary (admin-only management).
    Warehouses,
    /// Customer directory (open to any operator).
    Customers,
    /// Orders (open to any operator).
    Orders,
    /// Inventory operations journal (admin-only management).
    Operations,
    /// Per-warehouse stock levels (read-only).
    Stock,
}

impl Resource {
    /// All sections in navigation order; hotkeys 1-7 map to this array.
    pub const ALL: [Self; 7] = [
        Self::Users,
        Self::Products,
        Self::Warehouses,
        Self::Customers,
        Self::Orders,
        Self::Operations,
        Self::Stock,
    ];

    /// Section for a 1-based navigation hotkey.
    #[must_use]
    pub fn from_hotkey(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Position within the navigation order.
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|r| *r == self).unwrap_or(0)
    }

    /// Next section, wrapping.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous section, wrapping.
    #[must_use]
    pub fn prev(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.index() + len - 1) % len]
    }

    /// Static parameterization of this section.
    #[must_use]
    pub fn spec(self) -> &'static SectionSpec {
        match self {
            Self::Users => &users::SPEC,
            Self::Products => &products::SPEC,
            Self::Warehouses => &warehouses::SPEC,
            Self::Customers => &customers::SPEC,
            Self::Orders => &orders::SPEC,
            Self::Operations => &operations::SPEC,
            Self::Stock => &stock::SPEC,
        }
    }
}

/// One table column: record field plus header title.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    /// Record field rendered in this column.
    pub field: &'static str,
    /// Header title.
    pub title: &'static str,
}

/// Static description of a section.
#[derive(Debug, Clone, Copy)]
pub struct SectionSpec {
    /// Card title.
    pub title: &'static str,
    /// Label of the add action, when the section supports creation.
    pub add_label: Option<&'static str>,
    /// Collection endpoint for the loader.
    pub list_path: &'static str,
    /// Field carrying row identity (and matched by the row filter).
    pub key_field: &'static str,
    /// Table columns in display order.
    pub columns: &'static [Column],
    /// Text shown when the loaded collection is empty.
    pub empty_text: &'static str,
    /// Text shown in the content slot when the response is not a list.
    pub non_list_text: &'static str,
    /// Maximum rows rendered, when the section caps its table.
    pub row_cap: Option<usize>,
}
