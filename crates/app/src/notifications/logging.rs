//! Log-only notification sender.

use async_trait::async_trait;
use tracing::info;

use super::{Notification, NotificationError, NotificationSender};

/// Writes every notification to the structured log instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct LogNotificationSender;

impl LogNotificationSender {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationSender for LogNotificationSender {
    async fn send(&self, notifications: Vec<Notification>) -> Result<(), NotificationError> {
        for notification in &notifications {
            info!(
                recipient = %notification.recipient,
                subject = %notification.subject,
                body = %notification.body,
                "notification"
            );
        }

        Ok(())
    }
}
