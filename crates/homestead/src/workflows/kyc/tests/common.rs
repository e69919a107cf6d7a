use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::ModerationConfig;
use crate::workflows::kyc::domain::{DocumentType, KycRequest, KycStatus, UserId};
use crate::workflows::kyc::repository::{KycRecord, KycRepository, KycRepositoryError};
use crate::workflows::kyc::{kyc_router, KycService};
use crate::workflows::notify::{Notice, NotificationPublisher, NotifyError};

pub(super) fn request() -> KycRequest {
    request_for("usr-9")
}

pub(super) fn request_for(user: &str) -> KycRequest {
    KycRequest {
        user_id: UserId(user.to_string()),
        document_type: Some(DocumentType::Citizenship),
        front_image_url: Some("https://img.example/kyc/front.jpg".to_string()),
        back_image_url: Some("https://img.example/kyc/back.jpg".to_string()),
    }
}

pub(super) fn incomplete_request() -> KycRequest {
    let mut request = request();
    request.back_image_url = None;
    request
}

pub(super) fn moderation_config() -> ModerationConfig {
    ModerationConfig { queue_page_size: 25 }
}

pub(super) fn build_service() -> (
    KycService<MemoryKyc, MemoryNotices>,
    Arc<MemoryKyc>,
    Arc<MemoryNotices>,
) {
    let repository = Arc::new(MemoryKyc::default());
    let notices = Arc::new(MemoryNotices::default());
    let service = KycService::new(repository.clone(), notices.clone(), moderation_config());
    (service, repository, notices)
}

#[derive(Default, Clone)]
pub(super) struct MemoryKyc {
    records: Arc<Mutex<HashMap<UserId, KycRecord>>>,
}

impl KycRepository for MemoryKyc {
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

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn kyc_router_with_service(
    service: KycService<MemoryKyc, MemoryNotices>,
) -> axum::Router {
    kyc_router(Arc::new(service))
}
