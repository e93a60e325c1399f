//! Notifications
//!
//! Outbound messages handed to a delivery backend. Delivery itself (SMTP and
//! friends) happens outside this service.

mod logging;
mod messages;
mod relay;

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use thiserror::Error;

pub use logging::LogNotificationSender;
pub use messages::{NEW_ITEM_SUBJECT, new_item_notifications};
pub use relay::{RelayConfig, RelayNotificationSender};

/// A single outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub subject: String,
    pub body: String,
    pub recipient: String,
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("notification relay request failed")]
    Http(#[from] reqwest::Error),

    #[error("notification relay rejected the batch: {0}")]
    Rejected(String),
}

#[automock]
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Deliver a batch of notifications. Fails if any part of the batch is refused.
    async fn send(&self, notifications: Vec<Notification>) -> Result<(), NotificationError>;
}
