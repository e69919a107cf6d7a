use std::io::Read;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use crate::config::ModerationConfig;
use crate::workflows::actor::Actor;
use crate::workflows::notify::{Notice, NotificationPublisher, NotifyError};

use super::domain::{
    ListingId, ListingStatus, ListingSubmission, MarketStatus, OwnerId, ValidationError,
};
use super::import::{self, ListingImportError};
use super::moderation::{self, InvalidTransition, MarketChange, StatusChange};
use super::repository::{ListingRecord, ListingRepository, RepositoryError};
use super::search::ListingQuery;

/// Service composing the status machine, repository, and notification seam.
pub struct ListingService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    queue_page_size: usize,
}

static LISTING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_listing_id() -> ListingId {
    let id = LISTING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ListingId(format!("lst-{id:06}"))
}

impl<R, N> ListingService<R, N>
where
    R: ListingRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, moderation: ModerationConfig) -> Self {
        Self {
            repository,
            notifier,
            queue_page_size: moderation.queue_page_size,
        }
    }

    /// Submit a new listing, returning the pending repository-backed record.
    pub fn submit(
        &self,
        submission: ListingSubmission,
    ) -> Result<ListingRecord, ListingServiceError> {
        submission.validate()?;

        let record = ListingRecord {
            id: next_listing_id(),
            owner: submission.owner,
            status: ListingStatus::Pending,
            market_status: MarketStatus::Available,
            details: submission.details,
            listed_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Fetch a listing subject to the visibility rule: approved records are
    /// public; pending and rejected records exist only for their owner and
    /// for admins.
    pub fn get(
        &self,
        actor: &Actor,
        id: &ListingId,
    ) -> Result<ListingRecord, ListingServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        if record.status == ListingStatus::Approved {
            return Ok(record);
        }

        match actor {
            Actor::Admin => Ok(record),
            Actor::User(id) if *id == record.owner.0 => Ok(record),
            _ => Err(ListingServiceError::Repository(RepositoryError::NotFound)),
        }
    }

    /// Approve a pending listing. Idempotent when already approved.
    pub fn approve(
        &self,
        actor: &Actor,
        id: &ListingId,
    ) -> Result<ListingRecord, ListingServiceError> {
        self.require_admin(actor)?;
        let mut record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        match moderation::approve(record.status)? {
            StatusChange::AlreadyInEffect => Ok(record),
            StatusChange::Applied(next) => {
                record.status = next;
                record.market_status = MarketStatus::Available;
                self.repository.update(record.clone())?;
                self.notify_decision("listing_approved", &record)?;
                Ok(record)
            }
        }
    }

    /// Reject a pending listing. Idempotent when already rejected.
    pub fn reject(
        &self,
        actor: &Actor,
        id: &ListingId,
    ) -> Result<ListingRecord, ListingServiceError> {
        self.require_admin(actor)?;
        let mut record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        match moderation::reject(record.status)? {
            StatusChange::AlreadyInEffect => Ok(record),
            StatusChange::Applied(next) => {
                record.status = next;
                self.repository.update(record.clone())?;
                self.notify_decision("listing_rejected", &record)?;
                Ok(record)
            }
        }
    }

    /// Return a rejected listing to the moderation queue.
    pub fn restore(
        &self,
        actor: &Actor,
        id: &ListingId,
    ) -> Result<ListingRecord, ListingServiceError> {
        self.require_admin(actor)?;
        let mut record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        match moderation::restore(record.status)? {
            StatusChange::AlreadyInEffect => Ok(record),
            StatusChange::Applied(next) => {
                record.status = next;
                self.repository.update(record.clone())?;
                self.notify_decision("listing_restored", &record)?;
                Ok(record)
            }
        }
    }

    /// Permanently remove a listing. Owner or admin only; the record must be
    /// approved or rejected.
    pub fn delete(&self, actor: &Actor, id: &ListingId) -> Result<(), ListingServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        self.require_owner_or_admin(actor, &record.owner)?;
        moderation::delete(record.status)?;
        self.repository.remove(id)?;
        Ok(())
    }

    /// Cycle the market status of an approved listing. Owner or admin only;
    /// requesting the current value is a success no-op.
    pub fn set_market_status(
        &self,
        actor: &Actor,
        id: &ListingId,
        requested: MarketStatus,
    ) -> Result<ListingRecord, ListingServiceError> {
        let mut record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        self.require_owner_or_admin(actor, &record.owner)?;

        match moderation::set_market_status(record.status, record.market_status, requested)? {
            MarketChange::AlreadyInEffect => Ok(record),
            MarketChange::Applied(next) => {
                record.market_status = next;
                self.repository.update(record.clone())?;
                Ok(record)
            }
        }
    }

    /// Public search over approved listings only.
    pub fn search(&self, query: &ListingQuery) -> Result<Vec<ListingRecord>, ListingServiceError> {
        let approved = self
            .repository
            .by_status(ListingStatus::Approved, self.queue_page_size)?;
        Ok(approved
            .into_iter()
            .filter(|record| query.matches(record))
            .collect())
    }

    /// Pending records awaiting review, for the admin queue.
    pub fn moderation_queue(
        &self,
        actor: &Actor,
    ) -> Result<Vec<ListingRecord>, ListingServiceError> {
        self.require_admin(actor)?;
        Ok(self
            .repository
            .by_status(ListingStatus::Pending, self.queue_page_size)?)
    }

    /// Rejected records, for the admin restore/delete surface.
    pub fn rejected_listings(
        &self,
        actor: &Actor,
    ) -> Result<Vec<ListingRecord>, ListingServiceError> {
        self.require_admin(actor)?;
        Ok(self
            .repository
            .by_status(ListingStatus::Rejected, self.queue_page_size)?)
    }

    /// Every record belonging to the owner, regardless of status.
    pub fn owner_listings(
        &self,
        owner: &OwnerId,
    ) -> Result<Vec<ListingRecord>, ListingServiceError> {
        Ok(self.repository.by_owner(owner)?)
    }

    /// Admin bulk intake: parse a CSV document and submit every row as a
    /// pending listing.
    pub fn import<D: Read>(
        &self,
        actor: &Actor,
        document: D,
    ) -> Result<Vec<ListingRecord>, ListingServiceError> {
        self.require_admin(actor)?;

        let submissions = import::submissions_from_reader(document)?;
        let mut imported = Vec::with_capacity(submissions.len());
        for submission in submissions {
            imported.push(self.submit(submission)?);
        }
        Ok(imported)
    }

    fn notify_decision(
        &self,
        template: &str,
        record: &ListingRecord,
    ) -> Result<(), ListingServiceError> {
        let notice = Notice::new(template, record.owner.0.clone())
            .with_detail("listing_id", record.id.0.clone())
            .with_detail("title", record.details.title.clone());
        self.notifier.publish(notice)?;
        Ok(())
    }

    fn require_admin(&self, actor: &Actor) -> Result<(), ListingServiceError> {
        if actor.is_admin() {
            Ok(())
        } else {
            Err(ListingServiceError::Forbidden)
        }
    }

    fn require_owner_or_admin(
        &self,
        actor: &Actor,
        owner: &OwnerId,
    ) -> Result<(), ListingServiceError> {
        match actor {
            Actor::Admin => Ok(()),
            Actor::User(id) if *id == owner.0 => Ok(()),
            _ => Err(ListingServiceError::Forbidden),
        }
    }
}

/// Error raised by the listing service.
#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transition(#[from] InvalidTransition),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
    #[error(transparent)]
    Import(#[from] ListingImportError),
    #[error("actor is not permitted to perform this action")]
    Forbidden,
}
