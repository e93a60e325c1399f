//! HTTP mail relay sender.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use super::{Notification, NotificationError, NotificationSender};

/// Configuration for the mail relay.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Endpoint that accepts a JSON batch of messages, e.g. `"http://relay:8025/send"`.
    pub url: String,

    /// Sender address stamped on every message.
    pub from: String,
}

/// POSTs each batch as JSON to a mail relay.
#[derive(Debug, Clone)]
pub struct RelayNotificationSender {
    config: RelayConfig,
    http: Client,
}

impl RelayNotificationSender {
    #[must_use]
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RelayBatch<'a> {
    from: &'a str,
    messages: &'a [Notification],
}

#[async_trait]
impl NotificationSender for RelayNotificationSender {
    async fn send(&self, notifications: Vec<Notification>) -> Result<(), NotificationError> {
        if notifications.is_empty() {
            return Ok(());
        }

        let response = self
            .http
            .post(&self.config.url)
            .json(&RelayBatch {
                from: &self.config.from,
                messages: &notifications,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(NotificationError::Rejected(format!(
                "relay responded with status {status}: {text}"
            )));
        }

        debug!(count = notifications.len(), "notifications relayed");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn empty_batch_skips_the_relay() -> TestResult {
        let sender = RelayNotificationSender::new(RelayConfig {
            url: "http://127.0.0.1:9/unreachable".to_string(),
            from: "shop@example.com".to_string(),
        });

        sender.send(Vec::new()).await?;

        Ok(())
    }

    #[test]
    fn batch_serializes_sender_and_messages() -> TestResult {
        let messages = [Notification {
            subject: "s".to_string(),
            body: "b".to_string(),
            recipient: "r@example.com".to_string(),
        }];

        let json = serde_json::to_value(RelayBatch {
            from: "shop@example.com",
            messages: &messages,
        })?;

        assert_eq!(json["from"], "shop@example.com");
        assert_eq!(json["messages"][0]["recipient"], "r@example.com");

        Ok(())
    }
}
