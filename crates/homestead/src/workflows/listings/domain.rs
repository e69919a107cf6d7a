use serde::{Deserialize, Serialize};

/// Identifier wrapper for marketplace listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(pub String);

/// Identifier wrapper for the user who submitted a listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub String);

/// Moderation status governing visibility and the actions available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Pending,
    Approved,
    Rejected,
}

impl ListingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ListingStatus::Pending => "pending",
            ListingStatus::Approved => "approved",
            ListingStatus::Rejected => "rejected",
        }
    }
}

/// Post-approval market state; meaningful only while a listing is approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketStatus {
    Available,
    OnHold,
    Sold,
}

impl MarketStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MarketStatus::Available => "available",
            MarketStatus::OnHold => "on_hold",
            MarketStatus::Sold => "sold",
        }
    }
}

/// Broad property category used by search filters and the import pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    House,
    Apartment,
    Land,
    Commercial,
}

impl PropertyKind {
    pub const fn label(self) -> &'static str {
        match self {
            PropertyKind::House => "house",
            PropertyKind::Apartment => "apartment",
            PropertyKind::Land => "land",
            PropertyKind::Commercial => "commercial",
        }
    }

    /// Parse the labels accepted in CSV imports and query strings.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "house" => Some(Self::House),
            "apartment" | "flat" => Some(Self::Apartment),
            "land" => Some(Self::Land),
            "commercial" => Some(Self::Commercial),
            _ => None,
        }
    }
}

/// Descriptive fields of a listing; mutable by owner or admin, no invariants
/// beyond the intake validation below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingDetails {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub kind: PropertyKind,
    pub city: String,
    #[serde(default)]
    pub address: String,
    pub price: u64,
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub area_sqft: u32,
    pub furnished: bool,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

/// Owner-provided payload creating a new pending listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSubmission {
    pub owner: OwnerId,
    pub details: ListingDetails,
}

impl ListingSubmission {
    /// Required-field checks applied before any write.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.details.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.details.price == 0 {
            return Err(ValidationError::ZeroPrice);
        }
        if self.details.city.trim().is_empty() {
            return Err(ValidationError::BlankCity);
        }
        Ok(())
    }
}

/// Intake validation failures surfaced to the submitting user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listing title must not be empty")]
    EmptyTitle,
    #[error("asking price must be greater than zero")]
    ZeroPrice,
    #[error("listing city must not be blank")]
    BlankCity,
}
