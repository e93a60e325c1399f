//! Test Helpers

use rust_decimal::Decimal;
use testresult::TestResult;

use crate::{
    domain::{
        access::Principal,
        carts::CartsService,
        items::{
            ItemsService,
            data::NewItem,
            records::{ItemRecord, ItemUuid},
        },
        orders::{OrdersService, records::OrderRecord},
        users::{
            UsersService,
            data::NewUser,
            records::{UserRecord, UserUuid},
        },
    },
    test::TestContext,
};

pub(crate) fn new_item(title: &str, price: &str) -> NewItem {
    NewItem {
        uuid: ItemUuid::new(),
        title: title.to_string(),
        description: format!("{title} rug"),
        price: price.parse::<Decimal>().expect("valid price"),
        image_url: None,
    }
}

pub(crate) async fn create_item(
    ctx: &TestContext,
    title: &str,
    price: &str,
) -> TestResult<ItemRecord> {
    Ok(ctx.items.create_item(&ctx.admin, new_item(title, price)).await?)
}

pub(crate) async fn create_user(
    ctx: &TestContext,
    username: &str,
    is_staff: bool,
) -> TestResult<UserRecord> {
    Ok(ctx
        .users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: format!("{username}-password"),
            is_staff,
            receive_emails_order_updates: true,
            receive_emails_new_items: false,
        })
        .await?)
}

/// A regular user with the given new item preference.
pub(crate) async fn create_subscriber(
    ctx: &TestContext,
    username: &str,
    receive_emails_new_items: bool,
) -> TestResult<UserRecord> {
    Ok(ctx
        .users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: format!("{username}-password"),
            is_staff: false,
            receive_emails_order_updates: true,
            receive_emails_new_items,
        })
        .await?)
}

/// Create an item priced `price`, put it in the cart and place the order.
pub(crate) async fn place_order_with_item(
    ctx: &TestContext,
    principal: &Principal,
    price: &str,
) -> TestResult<OrderRecord> {
    let item = create_item(ctx, "Rug", price).await?;

    ctx.carts.add_item(principal, item.uuid).await?;

    Ok(ctx.orders.create_order(principal).await?)
}
