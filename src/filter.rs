//! Pure predicate evaluation of a listing against the active criteria.

use serde::{Deserialize, Serialize};

use crate::model::{Category, CategoryDetails, Listing};

/// Individually addressable filter inputs, used by the shell to report
/// keystrokes without an event per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    PropertyType,
    MinArea,
    MinRooms,
    MaxPrice,
    Brand,
    Model,
    MinYear,
    MaxMileage,
    ServiceType,
    MinCost,
}

/// Active filter criteria for the listing feed.
///
/// Threshold filters hold the raw input strings; a value that does not
/// parse as a number leaves that filter inactive. Everything defaults to
/// inactive and is only reset by an explicit clear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub category: Option<Category>,
    pub search: String,
    // Real estate
    pub property_type: String,
    pub min_area: String,
    pub min_rooms: String,
    pub max_price: String,
    // Auto
    pub brand: String,
    pub model: String,
    pub min_year: String,
    pub max_mileage: String,
    // Services
    pub service_type: String,
    pub min_cost: String,
}

impl FilterCriteria {
    pub fn set(&mut self, field: FilterField, value: String) {
        match field {
            FilterField::PropertyType => self.property_type = value,
            FilterField::MinArea => self.min_area = value,
            FilterField::MinRooms => self.min_rooms = value,
            FilterField::MaxPrice => self.max_price = value,
            FilterField::Brand => self.brand = value,
            FilterField::Model => self.model = value,
            FilterField::MinYear => self.min_year = value,
            FilterField::MaxMileage => self.max_mileage = value,
            FilterField::ServiceType => self.service_type = value,
            FilterField::MinCost => self.min_cost = value,
        }
    }

    /// Whether `listing` passes every active predicate.
    ///
    /// All active predicates AND together. The name search applies
    /// regardless of category; category-specific filters apply only while
    /// their category is selected, and a selected category excludes every
    /// listing of another category whatever its other fields hold.
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        if !text_contains(&self.search, &listing.name) {
            return false;
        }

        match (self.category, &listing.details) {
            (None, _) => true,
            (
                Some(Category::RealEstate),
                CategoryDetails::RealEstate {
                    property_type,
                    area,
                    rooms,
                    price,
                },
            ) => {
                text_contains(&self.property_type, property_type)
                    && at_least(&self.min_area, *area)
                    && at_least(&self.min_rooms, f64::from(*rooms))
                    && at_most(&self.max_price, *price)
            }
            (
                Some(Category::Auto),
                CategoryDetails::Auto {
                    brand,
                    model,
                    year,
                    mileage,
                },
            ) => {
                text_contains(&self.brand, brand)
                    && text_contains(&self.model, model)
                    && at_least(&self.min_year, f64::from(*year))
                    && at_most(&self.max_mileage, *mileage)
            }
            (
                Some(Category::Services),
                CategoryDetails::Services {
                    service_type, cost, ..
                },
            ) => text_contains(&self.service_type, service_type) && at_least(&self.min_cost, *cost),
            (Some(_), _) => false,
        }
    }
}

/// Case-insensitive substring containment; an empty filter always passes.
fn text_contains(filter: &str, value: &str) -> bool {
    let filter = filter.trim();
    filter.is_empty() || value.to_lowercase().contains(&filter.to_lowercase())
}

fn threshold(filter: &str) -> Option<f64> {
    let parsed = filter.trim().parse::<f64>().ok()?;
    parsed.is_finite().then_some(parsed)
}

fn at_least(filter: &str, value: f64) -> bool {
    threshold(filter).map_or(true, |t| value >= t)
}

fn at_most(filter: &str, value: f64) -> bool {
    threshold(filter).map_or(true, |t| value <= t)
}
