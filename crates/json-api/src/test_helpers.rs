//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use rugs_app::{
    auth::{ApiTokenMetadata, ApiTokenVersion, IssuedApiToken, MockAuthService, TokenUuid},
    context::AppContext,
    domain::{
        access::Principal,
        carts::MockCartsService,
        items::{
            MockItemsService,
            records::{ItemRecord, ItemStatus, ItemUuid},
        },
        orders::{
            MockOrdersService,
            records::{OrderRecord, OrderStatus, OrderUuid},
        },
        users::{
            MockUsersService,
            records::{UserRecord, UserUuid},
        },
    },
};

use crate::state::State;

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(1));
pub(crate) const TEST_STAFF_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(2));

pub(crate) fn customer() -> Principal {
    Principal::user(TEST_USER_UUID)
}

pub(crate) fn staff() -> Principal {
    Principal::staff(TEST_STAFF_UUID)
}

/// One mock per service. Mocks with no expectations fail on any call.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) items: MockItemsService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) users: MockUsersService,
    pub(crate) auth: MockAuthService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            items: Arc::new(self.items),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            users: Arc::new(self.users),
            auth: Arc::new(self.auth),
        })
    }

    /// Serve `route` as `principal`, or anonymously when `None`.
    pub(crate) fn service(self, principal: Option<Principal>, route: Router) -> Service {
        let mut router = Router::new().hoop(inject(self.into_state()));

        if let Some(principal) = principal {
            router = router.hoop(inject(principal));
        }

        Service::new(router.push(route))
    }
}

pub(crate) fn make_item(uuid: ItemUuid, title: &str, price: Decimal) -> ItemRecord {
    ItemRecord {
        uuid,
        title: title.to_string(),
        description: format!("{title} description"),
        price,
        image_url: None,
        status: ItemStatus::Available,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, user: UserUuid, items: Vec<ItemUuid>) -> OrderRecord {
    OrderRecord {
        uuid,
        user_uuid: user,
        item_count: u32::try_from(items.len()).unwrap_or(u32::MAX),
        items,
        price: Decimal::new(499, 2),
        status: OrderStatus::Pending,
        placed_at: Timestamp::UNIX_EPOCH,
        ready_at: None,
        completed_at: None,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_user(uuid: UserUuid, username: &str) -> UserRecord {
    UserRecord {
        uuid,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        is_staff: false,
        receive_emails_order_updates: true,
        receive_emails_new_items: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_issued_token(user: UserUuid) -> IssuedApiToken {
    let uuid = TokenUuid::new();

    IssuedApiToken {
        token: format!("rg_v1_{uuid}.{}", "ab".repeat(32)),
        metadata: ApiTokenMetadata {
            uuid,
            user_uuid: user,
            version: ApiTokenVersion::V1,
            created_at: Timestamp::UNIX_EPOCH,
            last_used_at: None,
            expires_at: Some(Timestamp::UNIX_EPOCH),
            revoked_at: None,
        },
    }
}

/// A storage failure for error-path tests.
pub(crate) fn storage_error() -> sqlx::Error {
    sqlx::Error::PoolTimedOut
}
