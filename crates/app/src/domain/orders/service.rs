//! Orders service.
//!
//! Placing an order turns the caller's cart into a frozen snapshot inside one
//! transaction. The cart is planned from an unlocked read, so an item that was
//! already gone is a plain validation error. The planned item rows are then
//! locked in id order and claimed with a conditional update; if another order
//! claimed or an admin deleted one of them in the meantime, the row counts come
//! up short and the order is a claim conflict. Item rows are always locked
//! before cart rows. Any failure rolls all of it back.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        access::{Action, Principal, authorize},
        orders::{
            errors::OrdersServiceError,
            records::{OrderDetails, OrderRecord, OrderStatus, OrderUuid},
            repository::PgOrdersRepository,
            workflow::{UNAVAILABLE_ITEMS, plan_order, status_timestamps},
        },
        validation::ValidationErrors,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(&self, principal: &Principal) -> Result<OrderRecord, OrdersServiceError> {
        authorize(Some(principal), Action::PlaceOrder, None)?;

        let mut tx = self.db.begin().await?;

        let lines = self
            .repository
            .list_cart_lines(&mut tx, principal.user)
            .await?;

        let mut plan = plan_order(&lines)?;

        let prices = self.repository.lock_items(&mut tx, &plan.items).await?;
        let claimed = self.repository.claim_items(&mut tx, &plan.items).await?;

        if prices.len() != plan.item_count()
            || usize::try_from(claimed).ok() != Some(plan.item_count())
        {
            warn!(
                user = %principal.user,
                claimed,
                expected = plan.item_count(),
                "order lost an item claim"
            );

            return Err(OrdersServiceError::ClaimConflict(ValidationErrors::single(
                "items",
                UNAVAILABLE_ITEMS,
            )));
        }

        plan.price = prices.iter().sum();

        let order = self
            .repository
            .create_order(&mut tx, OrderUuid::new(), principal.user, &plan)
            .await?;

        self.repository
            .remove_cart_items(&mut tx, principal.user, &plan.items)
            .await?;

        tx.commit().await?;

        info!(
            order = %order.uuid,
            user = %order.user_uuid,
            items = order.item_count,
            price = %order.price,
            "order placed"
        );

        Ok(order)
    }

    async fn get_order(
        &self,
        principal: &Principal,
        order: OrderUuid,
    ) -> Result<OrderDetails, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, order).await?;

        authorize(Some(principal), Action::ReadOrder, Some(order.user_uuid))?;

        let items = self.repository.list_items(&mut tx, &order.items).await?;

        tx.commit().await?;

        Ok(OrderDetails { order, items })
    }

    async fn update_status(
        &self,
        principal: &Principal,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_order(&mut tx, order).await?;

        authorize(Some(principal), Action::UpdateOrder, Some(current.user_uuid))?;

        let (ready_at, completed_at) = status_timestamps(
            status,
            current.ready_at,
            current.completed_at,
            Timestamp::now(),
        );

        let updated = self
            .repository
            .update_order_status(&mut tx, order, status, ready_at, completed_at)
            .await?;

        tx.commit().await?;

        info!(order = %order, from = %current.status, to = %status, "order status changed");

        Ok(updated)
    }

    async fn delete_order(
        &self,
        principal: &Principal,
        order: OrderUuid,
    ) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_order(&mut tx, order).await?;

        authorize(Some(principal), Action::DeleteOrder, Some(current.user_uuid))?;

        let rows_affected = self.repository.delete_order(&mut tx, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_orders(
        &self,
        principal: &Principal,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        authorize(Some(principal), Action::ListOrders, None)?;

        let scope = (!principal.is_staff).then_some(principal.user);

        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders(&mut tx, scope).await?;

        tx.commit().await?;

        Ok(orders)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order for everything in the caller's cart.
    ///
    /// On success every item is marked not available and the cart is empty.
    /// On failure nothing changes.
    async fn create_order(&self, principal: &Principal) -> Result<OrderRecord, OrdersServiceError>;

    /// An order with the current records of its items. Owner or staff only.
    async fn get_order(
        &self,
        principal: &Principal,
        order: OrderUuid,
    ) -> Result<OrderDetails, OrdersServiceError>;

    /// Set the status, stamping ready or completion time. Any transition is accepted.
    async fn update_status(
        &self,
        principal: &Principal,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Delete an order. Its items stay not available.
    async fn delete_order(
        &self,
        principal: &Principal,
        order: OrderUuid,
    ) -> Result<(), OrdersServiceError>;

    /// Staff see every order, everyone else their own. Newest first.
    async fn list_orders(&self, principal: &Principal)
    -> Result<Vec<OrderRecord>, OrdersServiceError>;
}
