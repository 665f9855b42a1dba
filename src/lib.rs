//! Application core for the adboard classifieds client.
//!
//! The crate is a Crux app: a pure `Model`/`Event`/`update` state machine
//! with all side effects (REST backend, local draft storage, rendering)
//! expressed through capabilities. Shells embed the core over FFI or wasm,
//! feed it events and render the `ViewModel` it derives.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod capabilities;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod form;
pub mod model;
pub mod pagination;
pub mod view;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use config::{ApiConfig, ConfigError};
pub use error::TransportError;
pub use event::Event;
pub use filter::{FilterCriteria, FilterField};
pub use form::{DraftError, ListingDraft};
pub use model::{
    Category, CategoryDetails, Listing, ListingId, ListingPayload, LoadState, Model, RequestToken,
};
pub use view::{ListingDetail, ListingSummary, ViewModel};

/// Backend used when the shell does not supply one at startup.
pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Listings shown per feed page.
pub const PAGE_SIZE: usize = 5;

/// Storage key for the in-progress new-listing draft. Versioned so a future
/// draft shape can ignore stale entries instead of failing to parse them.
pub const DRAFT_KEY: &str = "adboard:draft:new-listing:v1";
