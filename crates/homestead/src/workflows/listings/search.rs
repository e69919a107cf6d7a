use serde::Deserialize;

use super::domain::PropertyKind;
use super::repository::ListingRecord;

/// Conjunctive search filter over approved listings. Every field is optional;
/// an empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListingQuery {
    pub city: Option<String>,
    pub kind: Option<PropertyKind>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub min_bedrooms: Option<u8>,
    pub furnished: Option<bool>,
}

impl ListingQuery {
    pub fn matches(&self, record: &ListingRecord) -> bool {
        let details = &record.details;

        if let Some(city) = &self.city {
            if !details.city.eq_ignore_ascii_case(city.trim()) {
                return false;
            }
        }

        if let Some(kind) = self.kind {
            if details.kind != kind {
                return false;
            }
        }

        if let Some(min) = self.min_price {
            if details.price < min {
                return false;
            }
        }

        if let Some(max) = self.max_price {
            if details.price > max {
                return false;
            }
        }

        if let Some(min) = self.min_bedrooms {
            if details.bedrooms < min {
                return false;
            }
        }

        if let Some(furnished) = self.furnished {
            if details.furnished != furnished {
                return false;
            }
        }

        true
    }
}
