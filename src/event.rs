use serde::{Deserialize, Serialize};

use crux_http::Response;
use crux_kv::error::KeyValueError;

use crate::filter::FilterField;
use crate::form::ListingDraft;
use crate::model::{Category, Listing, ListingId, RequestToken};

/// Everything that can happen to the app: shell interactions and capability
/// responses alike. Capability-result variants are skipped by serde — they
/// are produced inside the core, never sent across the FFI boundary.
#[derive(Serialize, Deserialize, Debug)]
pub enum Event {
    /// Shell start-up; optionally overrides the backend base URL.
    AppStarted { api_base: Option<String> },

    // Feed
    RefreshRequested,
    CategorySelected { category: Option<Category> },
    SearchChanged { text: String },
    FilterChanged { field: FilterField, value: String },
    FiltersCleared,
    PageSelected { page: usize },

    // Detail
    ListingOpened { id: ListingId },
    ListingClosed,
    DeleteRequested { id: ListingId },

    // Form
    CreateFormOpened,
    EditFormOpened { id: ListingId },
    DraftChanged(Box<ListingDraft>),
    DraftCleared,
    SubmitRequested,

    // Capability responses (boxed to keep the enum small)
    #[serde(skip)]
    ListingsFetched {
        token: RequestToken,
        response: Box<crux_http::Result<Response<Vec<Listing>>>>,
    },
    #[serde(skip)]
    ListingFetched {
        token: RequestToken,
        response: Box<crux_http::Result<Response<Listing>>>,
    },
    #[serde(skip)]
    Created {
        token: RequestToken,
        response: Box<crux_http::Result<Response<Listing>>>,
    },
    #[serde(skip)]
    Updated {
        token: RequestToken,
        response: Box<crux_http::Result<Response<Listing>>>,
    },
    #[serde(skip)]
    Deleted {
        id: ListingId,
        token: RequestToken,
        response: Box<crux_http::Result<Response<Vec<u8>>>>,
    },
    #[serde(skip)]
    DraftLoaded(Result<Option<Vec<u8>>, KeyValueError>),
    /// Ack for fire-and-forget draft writes and removals; only logged.
    #[serde(skip)]
    DraftStored(Result<Option<Vec<u8>>, KeyValueError>),
}
