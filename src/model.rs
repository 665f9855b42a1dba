use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::filter::FilterCriteria;
use crate::form::ListingDraft;

/// Server-assigned listing identifier. Unique, immutable once issued.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ListingId(pub u64);

impl ListingId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    RealEstate,
    Auto,
    Services,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::RealEstate, Self::Auto, Self::Services];

    /// Canonical server-facing tag, as it appears on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RealEstate => "real_estate",
            Self::Auto => "auto",
            Self::Services => "services",
        }
    }

    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "real_estate" | "realestate" | "realty" | "property" => Some(Self::RealEstate),
            "auto" | "car" | "vehicle" => Some(Self::Auto),
            "services" | "service" => Some(Self::Services),
            _ => None,
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::RealEstate => "Real estate",
            Self::Auto => "Auto",
            Self::Services => "Services",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Category-specific attributes. A listing carries exactly one group, by
/// construction; an auto listing cannot hold a room count.
///
/// Serializes flat with a `category` tag and camelCase field names, matching
/// the backend's record shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum CategoryDetails {
    #[serde(rename_all = "camelCase")]
    RealEstate {
        property_type: String,
        area: f64,
        rooms: u32,
        price: f64,
    },
    #[serde(rename_all = "camelCase")]
    Auto {
        brand: String,
        model: String,
        year: u32,
        mileage: f64,
    },
    #[serde(rename_all = "camelCase")]
    Services {
        service_type: String,
        experience: String,
        cost: f64,
    },
}

impl CategoryDetails {
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::RealEstate { .. } => Category::RealEstate,
            Self::Auto { .. } => Category::Auto,
            Self::Services { .. } => Category::Services,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub name: String,
    pub description: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub details: CategoryDetails,
}

impl Listing {
    #[must_use]
    pub const fn category(&self) -> Category {
        self.details.category()
    }
}

/// Create request body: a listing without the server-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPayload {
    pub name: String,
    pub description: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub details: CategoryDetails,
}

impl ListingPayload {
    /// Attaches an id, producing the full record an update request sends.
    #[must_use]
    pub fn into_listing(self, id: ListingId) -> Listing {
        Listing {
            id,
            name: self.name,
            description: self.description,
            location: self.location,
            image: self.image,
            details: self.details,
        }
    }
}

/// Correlates an in-flight request with its response. A response whose token
/// no longer matches the container's outstanding one is discarded, which
/// makes the "unmounted while loading" case explicit instead of accidental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestToken(Uuid);

impl RequestToken {
    #[must_use]
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

impl LoadState {
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Remote-operation bookkeeping shared by both containers: load state, the
/// user-facing error slot, and the token of the outstanding request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteStatus {
    pub state: LoadState,
    pub error: Option<String>,
    pub in_flight: Option<RequestToken>,
}

impl RemoteStatus {
    /// Starts a request, superseding any outstanding one.
    pub fn begin(&mut self) -> RequestToken {
        let token = RequestToken::fresh();
        self.state = LoadState::Loading;
        self.error = None;
        self.in_flight = Some(token);
        token
    }

    /// True when `token` belongs to the outstanding request; ends it.
    /// A mismatch means the request was superseded or cancelled.
    pub fn accept(&mut self, token: RequestToken) -> bool {
        if self.in_flight == Some(token) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    pub fn succeed(&mut self) {
        self.state = LoadState::Loaded;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = LoadState::Error;
        self.error = Some(message.into());
    }
}

/// Authoritative in-memory listing collection. Filtering and pagination read
/// it but never mutate it; they derive views in `ViewModel::from_model`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingsState {
    pub items: Vec<Listing>,
    pub status: RemoteStatus,
}

impl ListingsState {
    #[must_use]
    pub fn get(&self, id: ListingId) -> Option<&Listing> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Replaces the record with a matching id, if present.
    pub fn replace(&mut self, listing: Listing) {
        if let Some(slot) = self.items.iter_mut().find(|item| item.id == listing.id) {
            *slot = listing;
        }
    }

    pub fn remove(&mut self, id: ListingId) {
        self.items.retain(|item| item.id != id);
    }
}

/// The single selected listing backing the detail view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentListingState {
    pub item: Option<Listing>,
    pub status: RemoteStatus,
}

impl CurrentListingState {
    /// Back to idle with no item; also invalidates any in-flight token.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Default)]
pub struct Model {
    pub api: ApiConfig,
    pub listings: ListingsState,
    pub current: CurrentListingState,
    pub filters: FilterCriteria,
    pub page: usize,
    pub draft: ListingDraft,
    pub editing: Option<ListingId>,
    pub form_error: Option<String>,
}

impl Model {
    /// Looks a listing up in the collection, falling back to the current
    /// item (covers a detail view whose record is not on the fetched list).
    #[must_use]
    pub fn find_listing(&self, id: ListingId) -> Option<&Listing> {
        self.listings
            .get(id)
            .or_else(|| self.current.item.as_ref().filter(|item| item.id == id))
    }

    /// How many listings pass the active filters.
    #[must_use]
    pub fn matching_count(&self) -> usize {
        self.listings
            .items
            .iter()
            .filter(|item| self.filters.matches(item))
            .count()
    }
}
