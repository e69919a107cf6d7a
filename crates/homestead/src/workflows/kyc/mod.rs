//! KYC identity verification: submission, review, and trust derivation.

pub mod domain;
pub mod repository;
pub mod review;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    DocumentType, KycDocument, KycId, KycRequest, KycStatus, KycValidationError, UserId,
    VerificationSnapshot,
};
pub use repository::{KycRecord, KycRepository, KycRepositoryError, KycView};
pub use review::{InvalidReview, ReviewChange};
pub use router::kyc_router;
pub use service::{KycService, KycServiceError};
