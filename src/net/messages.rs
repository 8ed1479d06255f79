//! Request/outcome protocol between the UI loop and the API worker.
//!
//! Every call carries a [`RequestTag`] that travels untouched through the
//! worker and comes back attached to the outcome. Tags are how the handler
//! decides whether a response still matters: generation-tagged responses for
//! a section that has since been replaced, or modal-tagged responses for a
//! modal that has since closed, are dropped without touching state.

use crate::api::{ApiFailure, RequestSpec};
use crate::sections::Resource;
use serde_json::Value;

/// One dictionary of the operation-create prelude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreludePart {
    /// `GET /api/v1/operation-types`.
    Types,
    /// `GET /api/v1/dictionary/products`.
    Products,
    /// `GET /api/v1/customers`.
    Customers,
}

/// Identifies what a response is for.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestTag {
    /// The bootstrap `GET /api/v1/auth/me`.
    Identity,
    /// A section loader run. Stale when the live section's resource or
    /// generation differ.
    SectionLoad {
        /// Section the loader was started for.
        resource: Resource,
        /// Generation of the section at request time.
        generation: u64,
    },
    /// The warehouse dictionary feeding the stock selector.
    SelectorLoad {
        /// Generation of the stock section at request time.
        generation: u64,
    },
    /// A stock table fetch for the confirmed warehouse.
    StockLoad {
        /// Generation of the stock section at request time.
        generation: u64,
    },
    /// A modal save. Stale when no modal with this id is open.
    ModalSave {
        /// Id of the modal that issued the save.
        modal_id: u64,
    },
    /// The collection re-fetch that prefills a user edit form.
    EditPrefill {
        /// Id of the modal awaiting the prefill.
        modal_id: u64,
        /// Login to scan for.
        key: String,
    },
    /// The customer list fetched before opening the order form.
    OrderPrelude,
    /// One dictionary of the three-way operation-create prelude.
    OperationPrelude {
        /// Which dictionary this response carries.
        part: PreludePart,
        /// Id of the buffered prelude.
        prelude_id: u64,
    },
}

/// A call for the worker to execute.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Routing tag echoed back with the outcome.
    pub tag: RequestTag,
    /// The call itself.
    pub spec: RequestSpec,
}

/// A completed call, posted back to the UI loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiOutcome {
    /// Tag of the originating request.
    pub tag: RequestTag,
    /// Parsed body or the error envelope.
    pub result: Result<Value, ApiFailure>,
}
