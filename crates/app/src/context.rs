//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::info;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        items::{ItemsService, PgItemsService},
        orders::{OrdersService, PgOrdersService},
        users::{PgUsersService, UsersService},
    },
    notifications::NotificationSender,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] MigrateError),
}

/// Runtime settings the services are built with.
#[derive(Clone)]
pub struct AppOptions {
    /// Apply pending migrations before serving.
    pub migrate: bool,

    /// Bearer token lifetime; `None` never expires.
    pub token_ttl: Option<SignedDuration>,

    pub notifier: Arc<dyn NotificationSender>,

    /// Public storefront address used in outgoing links.
    pub site_url: String,
}

#[derive(Clone)]
pub struct AppContext {
    pub items: Arc<dyn ItemsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub users: Arc<dyn UsersService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating the database fails.
    pub async fn from_database_url(url: &str, options: AppOptions) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        if options.migrate {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;

            info!("database migrations applied");
        }

        let db = Db::new(pool.clone());

        Ok(Self {
            items: Arc::new(PgItemsService::new(
                db.clone(),
                options.notifier,
                options.site_url,
            )),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db)),
            auth: Arc::new(PgAuthService::new(pool, options.token_ttl)),
        })
    }
}
