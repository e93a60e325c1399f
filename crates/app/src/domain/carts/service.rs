//! Carts service.
//!
//! A cart is the set of items a user has put aside. Adding an item does not
//! reserve it; availability is only claimed when an order is placed.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        access::{Action, Principal, authorize},
        carts::{errors::CartsServiceError, records::Cart, repository::PgCartsRepository},
        items::records::{ItemRecord, ItemUuid},
        validation::ValidationErrors,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    repository: PgCartsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCartsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, principal: &Principal) -> Result<Cart, CartsServiceError> {
        authorize(Some(principal), Action::ManageCart, None)?;

        let mut tx = self.db.begin().await?;

        let items = self.repository.list_cart_items(&mut tx, principal.user).await?;

        tx.commit().await?;

        Ok(Cart::new(items))
    }

    async fn get_item(
        &self,
        principal: &Principal,
        item: ItemUuid,
    ) -> Result<ItemRecord, CartsServiceError> {
        authorize(Some(principal), Action::ManageCart, None)?;

        let mut tx = self.db.begin().await?;

        let item = self
            .repository
            .get_cart_item(&mut tx, principal.user, item)
            .await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn add_item(
        &self,
        principal: &Principal,
        item: ItemUuid,
    ) -> Result<ItemRecord, CartsServiceError> {
        authorize(Some(principal), Action::ManageCart, None)?;

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .lock_item(&mut tx, item)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        if !record.is_available() {
            return Err(ValidationErrors::single("item", "item is not available").into());
        }

        let added = self
            .repository
            .add_cart_item(&mut tx, principal.user, item)
            .await?;

        tx.commit().await?;

        debug!(user = %principal.user, %item, added, "cart item added");

        Ok(record)
    }

    async fn remove_item(
        &self,
        principal: &Principal,
        item: ItemUuid,
    ) -> Result<(), CartsServiceError> {
        authorize(Some(principal), Action::ManageCart, None)?;

        let mut tx = self.db.begin().await?;

        self.repository
            .remove_cart_item(&mut tx, principal.user, item)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn clear(&self, principal: &Principal) -> Result<(), CartsServiceError> {
        authorize(Some(principal), Action::ManageCart, None)?;

        let mut tx = self.db.begin().await?;

        self.repository.clear_cart(&mut tx, principal.user).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn size(&self, principal: &Principal) -> Result<u64, CartsServiceError> {
        authorize(Some(principal), Action::ManageCart, None)?;

        let mut tx = self.db.begin().await?;

        let count = self
            .repository
            .count_cart_items(&mut tx, principal.user)
            .await?;

        tx.commit().await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The caller's cart with a live price total.
    async fn get_cart(&self, principal: &Principal) -> Result<Cart, CartsServiceError>;

    /// An item from the caller's cart; `NotFound` when it isn't in the cart.
    async fn get_item(
        &self,
        principal: &Principal,
        item: ItemUuid,
    ) -> Result<ItemRecord, CartsServiceError>;

    /// Add an available item. Adding an item twice is a no-op.
    async fn add_item(
        &self,
        principal: &Principal,
        item: ItemUuid,
    ) -> Result<ItemRecord, CartsServiceError>;

    /// Remove an item if present.
    async fn remove_item(
        &self,
        principal: &Principal,
        item: ItemUuid,
    ) -> Result<(), CartsServiceError>;

    async fn clear(&self, principal: &Principal) -> Result<(), CartsServiceError>;

    async fn size(&self, principal: &Principal) -> Result<u64, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::items::{ItemsService, data::ItemUpdate, records::ItemStatus},
        test::{
            TestContext,
            helpers::{create_item, create_user},
        },
    };

    use super::*;

    async fn shopper(ctx: &TestContext) -> TestResult<Principal> {
        let user = create_user(ctx, "shopper", false).await?;

        Ok(Principal::user(user.uuid))
    }

    #[tokio::test]
    async fn adding_twice_is_the_same_as_adding_once() -> TestResult {
        let ctx = TestContext::new().await;
        let principal = shopper(&ctx).await?;
        let item = create_item(&ctx, "Kilim", "4.99").await?;

        ctx.carts.add_item(&principal, item.uuid).await?;
        let once = ctx.carts.get_cart(&principal).await?;

        ctx.carts.add_item(&principal, item.uuid).await?;
        let twice = ctx.carts.get_cart(&principal).await?;

        assert_eq!(once, twice);
        assert_eq!(ctx.carts.size(&principal).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_item_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let principal = shopper(&ctx).await?;

        let result = ctx.carts.add_item(&principal, ItemUuid::new()).await;

        assert!(matches!(result, Err(CartsServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn unavailable_item_cannot_be_added() -> TestResult {
        let ctx = TestContext::new().await;
        let principal = shopper(&ctx).await?;
        let item = create_item(&ctx, "Kilim", "4.99").await?;

        ctx.items
            .update_item(
                &ctx.admin,
                item.uuid,
                ItemUpdate {
                    status: Some(ItemStatus::NotAvailable),
                    ..ItemUpdate::default()
                },
            )
            .await?;

        let result = ctx.carts.add_item(&principal, item.uuid).await;

        assert!(matches!(result, Err(CartsServiceError::Validation(_))));
        assert_eq!(ctx.carts.size(&principal).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn total_follows_current_prices() -> TestResult {
        let ctx = TestContext::new().await;
        let principal = shopper(&ctx).await?;
        let kilim = create_item(&ctx, "Kilim", "4.99").await?;
        let runner = create_item(&ctx, "Runner", "10.01").await?;

        ctx.carts.add_item(&principal, kilim.uuid).await?;
        ctx.carts.add_item(&principal, runner.uuid).await?;

        assert_eq!(ctx.carts.get_cart(&principal).await?.total, Decimal::new(1500, 2));

        ctx.items
            .update_item(
                &ctx.admin,
                kilim.uuid,
                ItemUpdate {
                    price: Some(Decimal::new(999, 2)),
                    ..ItemUpdate::default()
                },
            )
            .await?;

        let cart = ctx.carts.get_cart(&principal).await?;

        assert_eq!(cart.total, Decimal::new(2000, 2));
        assert_eq!(cart.items[0].uuid, runner.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn remove_is_idempotent() -> TestResult {
        let ctx = TestContext::new().await;
        let principal = shopper(&ctx).await?;
        let item = create_item(&ctx, "Kilim", "4.99").await?;

        ctx.carts.add_item(&principal, item.uuid).await?;
        ctx.carts.remove_item(&principal, item.uuid).await?;
        ctx.carts.remove_item(&principal, item.uuid).await?;

        assert_eq!(ctx.carts.size(&principal).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn get_item_only_finds_cart_members() -> TestResult {
        let ctx = TestContext::new().await;
        let principal = shopper(&ctx).await?;
        let inside = create_item(&ctx, "Kilim", "4.99").await?;
        let outside = create_item(&ctx, "Runner", "5.99").await?;

        ctx.carts.add_item(&principal, inside.uuid).await?;

        assert_eq!(ctx.carts.get_item(&principal, inside.uuid).await?.uuid, inside.uuid);
        assert!(matches!(
            ctx.carts.get_item(&principal, outside.uuid).await,
            Err(CartsServiceError::NotFound)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn carts_are_per_user() -> TestResult {
        let ctx = TestContext::new().await;
        let alice = shopper(&ctx).await?;
        let bob = Principal::user(create_user(&ctx, "bob", false).await?.uuid);
        let item = create_item(&ctx, "Kilim", "4.99").await?;

        ctx.carts.add_item(&alice, item.uuid).await?;
        ctx.carts.add_item(&bob, item.uuid).await?;
        ctx.carts.clear(&alice).await?;

        assert_eq!(ctx.carts.size(&alice).await?, 0);
        assert_eq!(ctx.carts.size(&bob).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn deleted_item_leaves_the_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let principal = shopper(&ctx).await?;
        let item = create_item(&ctx, "Kilim", "4.99").await?;

        ctx.carts.add_item(&principal, item.uuid).await?;
        ctx.items.delete_item(&ctx.admin, item.uuid).await?;

        assert_eq!(ctx.carts.size(&principal).await?, 0);

        Ok(())
    }
}
