use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ListingDetails, ListingId, ListingStatus, MarketStatus, OwnerId};

/// Repository record combining the descriptive fields with moderation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: ListingId,
    pub owner: OwnerId,
    pub status: ListingStatus,
    pub market_status: MarketStatus,
    pub details: ListingDetails,
    pub listed_at: DateTime<Utc>,
}

impl ListingRecord {
    /// Full representation returned to the owner, admins, and public reads of
    /// approved listings. Market status is surfaced only once approved.
    pub fn view(&self) -> ListingView {
        ListingView {
            id: self.id.clone(),
            owner: self.owner.clone(),
            status: self.status.label(),
            market_status: match self.status {
                ListingStatus::Approved => Some(self.market_status.label()),
                _ => None,
            },
            listed_at: self.listed_at,
            details: self.details.clone(),
        }
    }

    /// Compact representation used in search results.
    pub fn summary(&self) -> ListingSummary {
        ListingSummary {
            id: self.id.clone(),
            title: self.details.title.clone(),
            kind: self.details.kind.label(),
            city: self.details.city.clone(),
            price: self.details.price,
            market_status: self.market_status.label(),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ListingRepository: Send + Sync {
    fn insert(&self, record: ListingRecord) -> Result<ListingRecord, RepositoryError>;
    fn update(&self, record: ListingRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ListingId) -> Result<Option<ListingRecord>, RepositoryError>;
    /// Remove the record entirely. Reads after a successful remove observe
    /// `None`; removing an absent id is `NotFound`.
    fn remove(&self, id: &ListingId) -> Result<(), RepositoryError>;
    fn by_status(
        &self,
        status: ListingStatus,
        limit: usize,
    ) -> Result<Vec<ListingRecord>, RepositoryError>;
    fn by_owner(&self, owner: &OwnerId) -> Result<Vec<ListingRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of a stored listing.
#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    pub id: ListingId,
    pub owner: OwnerId,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_status: Option<&'static str>,
    pub listed_at: DateTime<Utc>,
    pub details: ListingDetails,
}

/// Search-result row for public queries.
#[derive(Debug, Clone, Serialize)]
pub struct ListingSummary {
    pub id: ListingId,
    pub title: String,
    pub kind: &'static str,
    pub city: String,
    pub price: u64,
    pub market_status: &'static str,
}
