//! Server configuration module

use clap::Parser;

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    notifications::NotificationsConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod notifications;
pub(crate) mod observability;
pub(crate) mod server;

/// Rugs JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "rugs-json", about = "Rugs store JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Bearer token settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Outgoing email settings.
    #[command(flatten)]
    pub notifications: NotificationsConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // .env is optional
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
