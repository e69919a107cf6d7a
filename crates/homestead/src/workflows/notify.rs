//! Outbound notification seam shared by the moderation workflows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Templated message dispatched to a user when a moderation decision lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub template: String,
    pub recipient: String,
    pub details: BTreeMap<String, String>,
}

impl Notice {
    pub fn new(template: &str, recipient: impl Into<String>) -> Self {
        Self {
            template: template.to_string(),
            recipient: recipient.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<String>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }
}

/// Trait describing outbound notification hooks (e-mail, push, in-app inbox).
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notice: Notice) -> Result<(), NotifyError>;
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
