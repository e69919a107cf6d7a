//! Listing intake, search, and the moderation status machine.

pub mod domain;
pub mod import;
pub mod moderation;
pub mod repository;
pub mod router;
pub mod search;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ListingDetails, ListingId, ListingStatus, ListingSubmission, MarketStatus, OwnerId,
    PropertyKind, ValidationError,
};
pub use import::ListingImportError;
pub use moderation::{InvalidTransition, MarketChange, StatusChange};
pub use repository::{
    ListingRecord, ListingRepository, ListingSummary, ListingView, RepositoryError,
};
pub use router::listing_router;
pub use search::ListingQuery;
pub use service::{ListingService, ListingServiceError};
