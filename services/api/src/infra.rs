use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use homestead::workflows::kyc::{KycRecord, KycRepository, KycRepositoryError, KycStatus, UserId};
use homestead::workflows::listings::{
    ListingId, ListingRecord, ListingRepository, ListingStatus, OwnerId, RepositoryError,
};
use homestead::workflows::notify::{Notice, NotificationPublisher, NotifyError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryListingRepository {
    records: Arc<Mutex<HashMap<ListingId, ListingRecord>>>,
}

impl ListingRepository for InMemoryListingRepository {
    fn insert(&self, record: ListingRecord) -> Result<ListingRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ListingRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ListingId) -> Result<Option<ListingRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &ListingId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn by_status(
        &self,
        status: ListingStatus,
        limit: usize,
    ) -> Result<Vec<ListingRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.status == status)
            .take(limit)
            .cloned()
            .collect())
    }

    fn by_owner(&self, owner: &OwnerId) -> Result<Vec<ListingRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.owner == *owner)
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryKycRepository {
    records: Arc<Mutex<HashMap<UserId, KycRecord>>>,
}

impl KycRepository for InMemoryKycRepository {
    fn put(&self, record: KycRecord) -> Result<KycRecord, KycRepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.user_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, user: &UserId) -> Result<Option<KycRecord>, KycRepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(user).cloned())
    }

    fn pending(&self, limit: usize) -> Result<Vec<KycRecord>, KycRepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.status == KycStatus::Pending)
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Keeps dispatched notices in memory and mirrors them to the log, standing
/// in for a real mail/push transport.
#[derive(Default, Clone)]
pub(crate) struct InMemoryNotificationPublisher {
    events: Arc<Mutex<Vec<Notice>>>,
}

impl NotificationPublisher for InMemoryNotificationPublisher {
    fn publish(&self, notice: Notice) -> Result<(), NotifyError> {
        tracing::info!(template = %notice.template, recipient = %notice.recipient, "notice dispatched");
        let mut guard = self.events.lock().expect("notice mutex poisoned");
        guard.push(notice);
        Ok(())
    }
}

impl InMemoryNotificationPublisher {
    pub(crate) fn events(&self) -> Vec<Notice> {
        self.events.lock().expect("notice mutex poisoned").clone()
    }
}
