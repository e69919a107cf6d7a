//! Pure review transitions for KYC submissions.
//!
//! Approve and reject operate on pending submissions and are no-ops when the
//! record already carries the target status. A rejected submission can only
//! move again through resubmission, which replaces the record.

use super::domain::KycStatus;

/// Result of applying a review decision to the stored status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewChange {
    Applied(KycStatus),
    AlreadyInEffect,
}

/// Raised when a decision is attempted from a state that does not permit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot {action} a {status} submission", status = .from.label())]
pub struct InvalidReview {
    pub action: &'static str,
    pub from: KycStatus,
}

pub fn approve(current: KycStatus) -> Result<ReviewChange, InvalidReview> {
    match current {
        KycStatus::Pending => Ok(ReviewChange::Applied(KycStatus::Approved)),
        KycStatus::Approved => Ok(ReviewChange::AlreadyInEffect),
        KycStatus::Rejected => Err(InvalidReview {
            action: "approve",
            from: current,
        }),
    }
}

pub fn reject(current: KycStatus) -> Result<ReviewChange, InvalidReview> {
    match current {
        KycStatus::Pending => Ok(ReviewChange::Applied(KycStatus::Rejected)),
        KycStatus::Rejected => Ok(ReviewChange::AlreadyInEffect),
        KycStatus::Approved => Err(InvalidReview {
            action: "reject",
            from: current,
        }),
    }
}
