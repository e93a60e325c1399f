//! Notifications Config

use std::sync::Arc;

use clap::Args;
use thiserror::Error;

use rugs_app::notifications::{
    LogNotificationSender, NotificationSender, RelayConfig, RelayNotificationSender,
};

/// Where outgoing emails go.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum NotificationMode {
    /// Write messages to the log only.
    Log,

    /// POST messages to an HTTP mail relay.
    Relay,
}

#[derive(Debug, Error)]
pub enum NotificationsConfigError {
    #[error("NOTIFICATION_RELAY_URL is required when NOTIFICATION_MODE=relay")]
    MissingRelayUrl,
}

/// Outgoing email settings.
#[derive(Debug, Args)]
pub struct NotificationsConfig {
    /// Delivery mode (log, relay)
    #[arg(
        long = "notification-mode",
        env = "NOTIFICATION_MODE",
        value_enum,
        default_value_t = NotificationMode::Log
    )]
    pub mode: NotificationMode,

    /// Mail relay endpoint
    #[arg(long = "notification-relay-url", env = "NOTIFICATION_RELAY_URL")]
    pub relay_url: Option<String>,

    /// Sender address on outgoing emails
    #[arg(
        long = "notification-from",
        env = "NOTIFICATION_FROM",
        default_value = "no-reply@rugs.local"
    )]
    pub from: String,

    /// Public storefront address used in email links
    #[arg(long, env = "SITE_URL", default_value = "http://localhost:3000")]
    pub site_url: String,
}

impl NotificationsConfig {
    /// Build the sender selected by [`NotificationsConfig::mode`].
    pub fn sender(&self) -> Result<Arc<dyn NotificationSender>, NotificationsConfigError> {
        match self.mode {
            NotificationMode::Log => Ok(Arc::new(LogNotificationSender::new())),
            NotificationMode::Relay => {
                let url = self
                    .relay_url
                    .clone()
                    .ok_or(NotificationsConfigError::MissingRelayUrl)?;

                Ok(Arc::new(RelayNotificationSender::new(RelayConfig {
                    url,
                    from: self.from.clone(),
                })))
            }
        }
    }
}
