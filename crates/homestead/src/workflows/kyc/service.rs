use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use crate::config::ModerationConfig;
use crate::workflows::actor::Actor;
use crate::workflows::notify::{Notice, NotificationPublisher, NotifyError};
use crate::workflows::trust::{compute_trust_score, TrustFactors, TrustScore};

use super::domain::{
    KycId, KycRequest, KycStatus, KycValidationError, UserId, VerificationSnapshot,
};
use super::repository::{KycRecord, KycRepository, KycRepositoryError};
use super::review::{self, InvalidReview, ReviewChange};

/// Service composing validation, the review transitions, and notifications.
pub struct KycService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    queue_page_size: usize,
}

static KYC_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_kyc_id() -> KycId {
    let id = KYC_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    KycId(format!("kyc-{id:06}"))
}

impl<R, N> KycService<R, N>
where
    R: KycRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, moderation: ModerationConfig) -> Self {
        Self {
            repository,
            notifier,
            queue_page_size: moderation.queue_page_size,
        }
    }

    /// Submit or resubmit identity documents. The new record is pending with
    /// no rejection reason, replacing any earlier submission for the user.
    pub fn submit(&self, request: KycRequest) -> Result<KycRecord, KycServiceError> {
        let (user_id, document) = request.into_document()?;

        let record = KycRecord {
            kyc_id: next_kyc_id(),
            user_id,
            status: KycStatus::Pending,
            document,
            rejection_reason: None,
            submitted_at: Utc::now(),
        };

        let stored = self.repository.put(record)?;
        Ok(stored)
    }

    /// Fetch the user's active submission.
    pub fn status(&self, user: &UserId) -> Result<KycRecord, KycServiceError> {
        let record = self
            .repository
            .fetch(user)?
            .ok_or(KycRepositoryError::NotFound)?;
        Ok(record)
    }

    /// Approve a pending submission. Idempotent when already approved.
    pub fn approve(&self, actor: &Actor, user: &UserId) -> Result<KycRecord, KycServiceError> {
        self.require_admin(actor)?;
        let mut record = self
            .repository
            .fetch(user)?
            .ok_or(KycRepositoryError::NotFound)?;

        match review::approve(record.status)? {
            ReviewChange::AlreadyInEffect => Ok(record),
            ReviewChange::Applied(next) => {
                record.status = next;
                record.rejection_reason = None;
                let stored = self.repository.put(record)?;
                self.notify(&stored, "kyc_approved", None)?;
                Ok(stored)
            }
        }
    }

    /// Reject a pending submission with a reason shown to the user.
    pub fn reject(
        &self,
        actor: &Actor,
        user: &UserId,
        reason: String,
    ) -> Result<KycRecord, KycServiceError> {
        self.require_admin(actor)?;
        let mut record = self
            .repository
            .fetch(user)?
            .ok_or(KycRepositoryError::NotFound)?;

        match review::reject(record.status)? {
            ReviewChange::AlreadyInEffect => Ok(record),
            ReviewChange::Applied(next) => {
                record.status = next;
                record.rejection_reason = Some(reason.clone());
                let stored = self.repository.put(record)?;
                self.notify(&stored, "kyc_rejected", Some(reason))?;
                Ok(stored)
            }
        }
    }

    /// Pending submissions awaiting review, for the admin queue.
    pub fn review_queue(&self, actor: &Actor) -> Result<Vec<KycRecord>, KycServiceError> {
        self.require_admin(actor)?;
        Ok(self.repository.pending(self.queue_page_size)?)
    }

    /// Derive the trust score for a user. `kyc_approved` comes from the
    /// repository at query time; the remaining factors from the caller's
    /// profile snapshot. The score is never persisted.
    pub fn trust_score(
        &self,
        user: &UserId,
        snapshot: VerificationSnapshot,
    ) -> Result<TrustScore, KycServiceError> {
        let kyc_approved = self
            .repository
            .fetch(user)?
            .map(|record| record.status == KycStatus::Approved)
            .unwrap_or(false);

        let factors = TrustFactors {
            kyc_approved,
            email_verified: snapshot.email_verified,
            phone_verified: snapshot.phone_verified,
            has_profile_photo: snapshot.has_profile_photo,
            no_reports: snapshot.open_reports == 0,
        };

        Ok(compute_trust_score(factors))
    }

    fn notify(
        &self,
        record: &KycRecord,
        template: &str,
        reason: Option<String>,
    ) -> Result<(), KycServiceError> {
        let mut notice = Notice::new(template, record.user_id.0.clone())
            .with_detail("kyc_id", record.kyc_id.0.clone());
        if let Some(reason) = reason {
            notice = notice.with_detail("reason", reason);
        }
        self.notifier.publish(notice)?;
        Ok(())
    }

    fn require_admin(&self, actor: &Actor) -> Result<(), KycServiceError> {
        if actor.is_admin() {
            Ok(())
        } else {
            Err(KycServiceError::Forbidden)
        }
    }
}

/// Error raised by the KYC service.
#[derive(Debug, thiserror::Error)]
pub enum KycServiceError {
    #[error(transparent)]
    Validation(#[from] KycValidationError),
    #[error(transparent)]
    Review(#[from] InvalidReview),
    #[error(transparent)]
    Repository(#[from] KycRepositoryError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
    #[error("actor is not permitted to perform this action")]
    Forbidden,
}
