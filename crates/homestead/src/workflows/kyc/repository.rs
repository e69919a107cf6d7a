use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{KycDocument, KycId, KycStatus, UserId};

/// Repository record for a user's active KYC submission. One record per user;
/// resubmission replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KycRecord {
    pub kyc_id: KycId,
    pub user_id: UserId,
    pub status: KycStatus,
    pub document: KycDocument,
    /// Set only while the submission is rejected; cleared on resubmission.
    pub rejection_reason: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl KycRecord {
    pub fn view(&self) -> KycView {
        KycView {
            kyc_id: self.kyc_id.clone(),
            user_id: self.user_id.clone(),
            status: self.status.label(),
            document_type: self.document.document_type.label(),
            rejection_reason: self.rejection_reason.clone(),
            submitted_at: self.submitted_at,
        }
    }
}

/// Storage abstraction keyed by user; `put` inserts or replaces.
pub trait KycRepository: Send + Sync {
    fn put(&self, record: KycRecord) -> Result<KycRecord, KycRepositoryError>;
    fn fetch(&self, user: &UserId) -> Result<Option<KycRecord>, KycRepositoryError>;
    fn pending(&self, limit: usize) -> Result<Vec<KycRecord>, KycRepositoryError>;
}

/// Error enumeration for KYC repository failures.
#[derive(Debug, thiserror::Error)]
pub enum KycRepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of a submission's exposed state.
#[derive(Debug, Clone, Serialize)]
pub struct KycView {
    pub kyc_id: KycId,
    pub user_id: UserId,
    pub status: &'static str,
    pub document_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub submitted_at: DateTime<Utc>,
}
