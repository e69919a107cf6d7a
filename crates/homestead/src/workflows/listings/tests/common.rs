use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::ModerationConfig;
use crate::workflows::listings::domain::{
    ListingDetails, ListingId, ListingStatus, ListingSubmission, OwnerId, PropertyKind,
};
use crate::workflows::listings::repository::{
    ListingRecord, ListingRepository, RepositoryError,
};
use crate::workflows::listings::{listing_router, ListingService};
use crate::workflows::notify::{Notice, NotificationPublisher, NotifyError};

pub(super) fn details() -> ListingDetails {
    ListingDetails {
        title: "Sunny Bungalow".to_string(),
        description: "Detached bungalow with a garden".to_string(),
        kind: PropertyKind::House,
        city: "Pokhara".to_string(),
        address: "Lakeside Road 12".to_string(),
        price: 14_500_000,
        bedrooms: 3,
        bathrooms: 2,
        area_sqft: 1_800,
        furnished: true,
        amenities: vec!["parking".to_string(), "garden".to_string()],
        image_urls: vec!["https://img.example/front.jpg".to_string()],
    }
}

pub(super) fn submission() -> ListingSubmission {
    submission_for("own-1")
}

pub(super) fn submission_for(owner: &str) -> ListingSubmission {
    ListingSubmission {
        owner: OwnerId(owner.to_string()),
        details: details(),
    }
}

pub(super) fn untitled_submission() -> ListingSubmission {
    let mut submission = submission();
    submission.details.title = "  ".to_string();
    submission
}

pub(super) fn moderation_config() -> ModerationConfig {
    ModerationConfig { queue_page_size: 25 }
}

pub(super) fn build_service() -> (
    ListingService<MemoryListings, MemoryNotices>,
    Arc<MemoryListings>,
    Arc<MemoryNotices>,
) {
    let repository = Arc::new(MemoryListings::default());
    let notices = Arc::new(MemoryNotices::default());
    let service = ListingService::new(repository.clone(), notices.clone(), moderation_config());
    (service, repository, notices)
}

#[derive(Default, Clone)]
pub(super) struct MemoryListings {
    records: Arc<Mutex<HashMap<ListingId, ListingRecord>>>,
}

impl ListingRepository for MemoryListings {
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
pub(super) struct MemoryNotices {
    events: Arc<Mutex<Vec<Notice>>>,
}

impl MemoryNotices {
    pub(super) fn events(&self) -> Vec<Notice> {
        self.events.lock().expect("notice mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotices {
    fn publish(&self, notice: Notice) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("notice mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct UnavailableListings;

impl ListingRepository for UnavailableListings {
    fn insert(&self, _record: ListingRecord) -> Result<ListingRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ListingRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ListingId) -> Result<Option<ListingRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _id: &ListingId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn by_status(
        &self,
        _status: ListingStatus,
        _limit: usize,
    ) -> Result<Vec<ListingRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn by_owner(&self, _owner: &OwnerId) -> Result<Vec<ListingRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn listing_router_with_service(
    service: ListingService<MemoryListings, MemoryNotices>,
) -> axum::Router {
    listing_router(Arc::new(service))
}
