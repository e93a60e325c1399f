//! Test context for service-level integration tests.

use std::sync::Arc;

use crate::{
    auth::{DEFAULT_TOKEN_TTL, PgAuthService},
    database::Db,
    domain::{
        access::Principal,
        carts::PgCartsService,
        items::PgItemsService,
        orders::PgOrdersService,
        users::{PgUsersService, UsersService, data::NewUser, records::UserUuid},
    },
    notifications::LogNotificationSender,
};

use super::db::TestDb;

pub(crate) struct TestContext {
    pub db: TestDb,
    pub admin: Principal,
    pub auth: PgAuthService,
    pub items: PgItemsService,
    pub carts: PgCartsService,
    pub orders: PgOrdersService,
    pub users: PgUsersService,
}

impl TestContext {
    /// Fresh database with one staff account, exposed as `admin`.
    pub(crate) async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let users = PgUsersService::new(db.clone());

        let admin = users
            .create_user(NewUser {
                uuid: UserUuid::new(),
                username: "admin".to_string(),
                email: "admin@example.com".to_string(),
                password: "admin-password".to_string(),
                is_staff: true,
                receive_emails_order_updates: false,
                receive_emails_new_items: false,
            })
            .await
            .expect("Failed to create test admin");

        Self {
            admin: Principal::staff(admin.uuid),
            auth: PgAuthService::new(test_db.pool().clone(), Some(DEFAULT_TOKEN_TTL)),
            items: PgItemsService::new(
                db.clone(),
                Arc::new(LogNotificationSender::new()),
                "http://localhost:3000",
            ),
            carts: PgCartsService::new(db.clone()),
            orders: PgOrdersService::new(db),
            users,
            db: test_db,
        }
    }

    /// A `Db` handle on this context's database, for building extra services.
    pub(crate) fn database(&self) -> Db {
        Db::new(self.db.pool().clone())
    }
}
