//! Pure projections of the model for the shell. Filtering and pagination
//! are recomputed here on every render; nothing derived is cached.

use serde::{Deserialize, Serialize};

use crate::form::ListingDraft;
use crate::model::{Category, CategoryDetails, Listing, ListingId, LoadState, Model};
use crate::{pagination, PAGE_SIZE};

/// One row of the listing feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSummary {
    pub id: ListingId,
    pub name: String,
    pub location: String,
    pub category: Category,
    pub category_label: String,
    pub image: Option<String>,
}

impl ListingSummary {
    fn from_listing(listing: &Listing) -> Self {
        Self {
            id: listing.id,
            name: listing.name.clone(),
            location: listing.location.clone(),
            category: listing.category(),
            category_label: listing.category().display_name().to_string(),
            image: listing.image.clone(),
        }
    }
}

/// Full projection of the selected listing for the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingDetail {
    pub id: ListingId,
    pub name: String,
    pub description: String,
    pub location: String,
    pub category: Category,
    pub category_label: String,
    pub image: Option<String>,
    pub details: CategoryDetails,
}

impl ListingDetail {
    fn from_listing(listing: &Listing) -> Self {
        Self {
            id: listing.id,
            name: listing.name.clone(),
            description: listing.description.clone(),
            location: listing.location.clone(),
            category: listing.category(),
            category_label: listing.category().display_name().to_string(),
            image: listing.image.clone(),
            details: listing.details.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    // Feed
    pub listings: Vec<ListingSummary>,
    pub total_matching: usize,
    pub page: usize,
    pub page_count: usize,
    /// Hidden when everything fits on one page.
    pub show_pagination: bool,
    pub feed_state: LoadState,
    pub feed_error: Option<String>,
    // Detail
    pub current: Option<ListingDetail>,
    pub current_state: LoadState,
    pub current_error: Option<String>,
    // Form
    pub draft: ListingDraft,
    pub editing: bool,
    pub form_error: Option<String>,
}

impl ViewModel {
    #[must_use]
    pub fn from_model(model: &Model) -> Self {
        let matching: Vec<&Listing> = model
            .listings
            .items
            .iter()
            .filter(|listing| model.filters.matches(listing))
            .collect();

        let total_matching = matching.len();
        let page_count = pagination::page_count(total_matching, PAGE_SIZE);
        let page = pagination::clamp_page(model.page, total_matching, PAGE_SIZE);
        let listings = pagination::page_slice(&matching, page, PAGE_SIZE)
            .iter()
            .map(|listing| ListingSummary::from_listing(listing))
            .collect();

        Self {
            listings,
            total_matching,
            page,
            page_count,
            show_pagination: page_count > 1,
            feed_state: model.listings.status.state,
            feed_error: model.listings.status.error.clone(),
            current: model.current.item.as_ref().map(ListingDetail::from_listing),
            current_state: model.current.status.state,
            current_error: model.current.status.error.clone(),
            draft: model.draft.clone(),
            editing: model.editing.is_some(),
            form_error: model.form_error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ListingsState;

    fn service(id: u64, name: &str) -> Listing {
        Listing {
            id: ListingId(id),
            name: name.into(),
            description: String::new(),
            location: String::new(),
            image: None,
            details: CategoryDetails::Services {
                service_type: "repair".into(),
                experience: "5 years".into(),
                cost: 100.0,
            },
        }
    }

    fn model_with(count: u64) -> Model {
        let mut listings = ListingsState::default();
        for id in 0..count {
            listings.items.push(service(id, &format!("Service {id}")));
        }
        Model {
            listings,
            ..Model::default()
        }
    }

    #[test]
    fn single_page_hides_the_pagination_control() {
        let view = ViewModel::from_model(&model_with(5));
        assert_eq!(view.page_count, 1);
        assert!(!view.show_pagination);
        assert_eq!(view.listings.len(), 5);
    }

    #[test]
    fn overflow_creates_pages_of_fixed_size() {
        let mut model = model_with(12);
        let view = ViewModel::from_model(&model);
        assert_eq!(view.page_count, 3);
        assert!(view.show_pagination);
        assert_eq!(view.listings.len(), 5);

        model.page = 2;
        let view = ViewModel::from_model(&model);
        assert_eq!(view.listings.len(), 2);
        assert_eq!(view.listings[0].name, "Service 10");
    }

    #[test]
    fn out_of_range_page_is_clamped_in_the_view() {
        let mut model = model_with(3);
        model.page = 7;
        let view = ViewModel::from_model(&model);
        assert_eq!(view.page, 0);
        assert_eq!(view.listings.len(), 3);
    }

    #[test]
    fn filtering_narrows_the_feed() {
        let mut model = model_with(12);
        model.filters.search = "service 1".into();
        let view = ViewModel::from_model(&model);
        // "Service 1", "Service 10", "Service 11"
        assert_eq!(view.total_matching, 3);
        assert_eq!(view.page_count, 1);
    }
}
