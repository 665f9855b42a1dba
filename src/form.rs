//! Form draft and category-aware validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Category, CategoryDetails, Listing, ListingPayload};

/// First failing validation rule for a submitted draft. Rules are checked
/// in order — category, then common fields, then the selected category's
/// group — and later rules are not evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DraftError {
    #[error("Please choose a valid listing category.")]
    MissingCategory,
    #[error("Name, description and location are required.")]
    MissingCommonFields,
    #[error("Please fill in property type, area, rooms and price.")]
    IncompleteRealEstate,
    #[error("Please fill in brand, model, year and mileage.")]
    IncompleteAuto,
    #[error("Please fill in service type, experience and cost.")]
    IncompleteServices,
}

/// In-progress form state: a listing without an id.
///
/// Every category's field group is staged so switching category mid-edit
/// does not lose input; only the selected group is read at submit. Numeric
/// fields default to zero, which counts as unfilled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingDraft {
    pub name: String,
    pub description: String,
    pub location: String,
    pub category: Option<Category>,
    pub image: Option<String>,
    // Real estate
    pub property_type: String,
    pub area: f64,
    pub rooms: u32,
    pub price: f64,
    // Auto
    pub brand: String,
    pub model: String,
    pub year: u32,
    pub mileage: f64,
    // Services
    pub service_type: String,
    pub experience: String,
    pub cost: f64,
}

impl ListingDraft {
    /// Pre-populates the form for editing an existing listing.
    #[must_use]
    pub fn from_listing(listing: &Listing) -> Self {
        let mut draft = Self {
            name: listing.name.clone(),
            description: listing.description.clone(),
            location: listing.location.clone(),
            category: Some(listing.category()),
            image: listing.image.clone(),
            ..Self::default()
        };

        match &listing.details {
            CategoryDetails::RealEstate {
                property_type,
                area,
                rooms,
                price,
            } => {
                draft.property_type = property_type.clone();
                draft.area = *area;
                draft.rooms = *rooms;
                draft.price = *price;
            }
            CategoryDetails::Auto {
                brand,
                model,
                year,
                mileage,
            } => {
                draft.brand = brand.clone();
                draft.model = model.clone();
                draft.year = *year;
                draft.mileage = *mileage;
            }
            CategoryDetails::Services {
                service_type,
                experience,
                cost,
            } => {
                draft.service_type = service_type.clone();
                draft.experience = experience.clone();
                draft.cost = *cost;
            }
        }

        draft
    }

    /// Checks the draft against the submit rules, returning the selected
    /// category on success.
    pub fn validate(&self) -> Result<Category, DraftError> {
        let category = self.category.ok_or(DraftError::MissingCategory)?;

        if blank(&self.name) || blank(&self.description) || blank(&self.location) {
            return Err(DraftError::MissingCommonFields);
        }

        match category {
            Category::RealEstate => {
                if blank(&self.property_type)
                    || self.area == 0.0
                    || self.rooms == 0
                    || self.price == 0.0
                {
                    return Err(DraftError::IncompleteRealEstate);
                }
            }
            Category::Auto => {
                if blank(&self.brand) || blank(&self.model) || self.year == 0 || self.mileage == 0.0
                {
                    return Err(DraftError::IncompleteAuto);
                }
            }
            Category::Services => {
                if blank(&self.service_type) || blank(&self.experience) || self.cost == 0.0 {
                    return Err(DraftError::IncompleteServices);
                }
            }
        }

        Ok(category)
    }

    /// Converts a valid draft into the server-facing payload. Constructing
    /// the matching `CategoryDetails` variant is what re-maps the category
    /// onto its canonical wire tag and drops the other groups' staging
    /// values.
    pub fn to_payload(&self) -> Result<ListingPayload, DraftError> {
        let category = self.validate()?;

        let details = match category {
            Category::RealEstate => CategoryDetails::RealEstate {
                property_type: self.property_type.clone(),
                area: self.area,
                rooms: self.rooms,
                price: self.price,
            },
            Category::Auto => CategoryDetails::Auto {
                brand: self.brand.clone(),
                model: self.model.clone(),
                year: self.year,
                mileage: self.mileage,
            },
            Category::Services => CategoryDetails::Services {
                service_type: self.service_type.clone(),
                experience: self.experience.clone(),
                cost: self.cost,
            },
        };

        Ok(ListingPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            image: self.image.clone(),
            details,
        })
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ListingId;

    fn real_estate_draft() -> ListingDraft {
        ListingDraft {
            name: "Two-room apartment".into(),
            description: "Bright, quiet courtyard".into(),
            location: "Hillside".into(),
            category: Some(Category::RealEstate),
            property_type: "apartment".into(),
            area: 50.0,
            rooms: 2,
            price: 5_000_000.0,
            ..ListingDraft::default()
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert_eq!(real_estate_draft().validate(), Ok(Category::RealEstate));
    }

    #[test]
    fn category_is_checked_first() {
        // Everything is empty, but the category rule wins.
        let draft = ListingDraft::default();
        assert_eq!(draft.validate(), Err(DraftError::MissingCategory));
    }

    #[test]
    fn common_fields_are_checked_before_category_fields() {
        let draft = ListingDraft {
            name: "  ".into(),
            ..real_estate_draft()
        };
        assert_eq!(draft.validate(), Err(DraftError::MissingCommonFields));
    }

    #[test]
    fn each_real_estate_field_is_required() {
        for broken in [
            ListingDraft {
                property_type: String::new(),
                ..real_estate_draft()
            },
            ListingDraft {
                area: 0.0,
                ..real_estate_draft()
            },
            ListingDraft {
                rooms: 0,
                ..real_estate_draft()
            },
            ListingDraft {
                price: 0.0,
                ..real_estate_draft()
            },
        ] {
            assert_eq!(broken.validate(), Err(DraftError::IncompleteRealEstate));
        }
    }

    #[test]
    fn auto_and_services_have_their_own_messages() {
        let auto = ListingDraft {
            category: Some(Category::Auto),
            brand: "Toyota".into(),
            model: "Camry".into(),
            year: 0,
            mileage: 42_000.0,
            ..real_estate_draft()
        };
        assert_eq!(auto.validate(), Err(DraftError::IncompleteAuto));

        let services = ListingDraft {
            category: Some(Category::Services),
            service_type: "repair".into(),
            experience: String::new(),
            cost: 500.0,
            ..real_estate_draft()
        };
        assert_eq!(services.validate(), Err(DraftError::IncompleteServices));
    }

    #[test]
    fn payload_drops_unselected_staging_groups() {
        // Auto staging values left over from a category switch must not
        // leak into a real estate payload.
        let draft = ListingDraft {
            brand: "Toyota".into(),
            year: 2018,
            ..real_estate_draft()
        };

        let payload = draft.to_payload().unwrap();
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["category"], "real_estate");
        assert!(value.get("brand").is_none());
        assert!(value.get("year").is_none());
    }

    #[test]
    fn from_listing_round_trips_through_payload() {
        let listing = Listing {
            id: ListingId(5),
            name: "Plumbing".into(),
            description: "Emergency calls".into(),
            location: "Midtown".into(),
            image: Some("https://img.example/p.jpg".into()),
            details: CategoryDetails::Services {
                service_type: "repair".into(),
                experience: "10 years".into(),
                cost: 500.0,
            },
        };

        let draft = ListingDraft::from_listing(&listing);
        let rebuilt = draft.to_payload().unwrap().into_listing(listing.id);
        assert_eq!(rebuilt, listing);
    }
}
