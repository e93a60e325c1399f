//! Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    domain::{
        items::{
            records::{ItemRecord, ItemUuid},
            repository::decode_item_status,
        },
        orders::{
            records::{OrderRecord, OrderStatus, OrderUuid},
            workflow::{CartLine, OrderPlan},
        },
        users::records::UserUuid,
    },
    uuids::into_uuids,
};

const LIST_CART_LINES_SQL: &str = include_str!("sql/list_cart_lines.sql");
const LOCK_ITEMS_SQL: &str = include_str!("sql/lock_items.sql");
const CLAIM_ITEMS_SQL: &str = include_str!("sql/claim_items.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEMS_SQL: &str = include_str!("sql/create_order_items.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const DELETE_ORDER_SQL: &str = include_str!("sql/delete_order.sql");
const LIST_ITEMS_SQL: &str = include_str!("sql/list_items.sql");
const REMOVE_CART_ITEMS_SQL: &str = include_str!("sql/remove_cart_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// The user's cart with each item's current status and price, in id order.
    ///
    /// Nothing is locked; [`Self::lock_items`] and [`Self::claim_items`] decide
    /// what the order actually gets.
    pub(crate) async fn list_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        let rows = query(LIST_CART_LINES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        rows.iter()
            .map(|row| -> Result<CartLine, sqlx::Error> {
                let status: Option<String> = row.try_get("status")?;
                let price: Option<Decimal> = row.try_get("price")?;

                let current = match (status, price) {
                    (Some(status), Some(price)) => Some((decode_item_status(&status)?, price)),
                    _ => None,
                };

                Ok(CartLine {
                    item: ItemUuid::from_uuid(row.try_get("item_uuid")?),
                    current,
                })
            })
            .collect()
    }

    /// Lock the given item rows in id order and return their current prices.
    ///
    /// Items deleted in the meantime are missing from the result.
    pub(crate) async fn lock_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        items: &[ItemUuid],
    ) -> Result<Vec<Decimal>, sqlx::Error> {
        query_scalar::<Postgres, Decimal>(LOCK_ITEMS_SQL)
            .bind(into_uuids(items))
            .fetch_all(&mut **tx)
            .await
    }

    /// Flip available items to not available. Returns how many were claimed.
    pub(crate) async fn claim_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        items: &[ItemUuid],
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLAIM_ITEMS_SQL)
            .bind(into_uuids(items))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        user: UserUuid,
        plan: &OrderPlan,
    ) -> Result<OrderRecord, sqlx::Error> {
        let item_count =
            i32::try_from(plan.item_count()).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        query(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .bind(item_count)
            .bind(plan.price)
            .execute(&mut **tx)
            .await?;

        query(CREATE_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .bind(into_uuids(&plan.items))
            .execute(&mut **tx)
            .await?;

        self.get_order(tx, order).await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Same as [`Self::get_order`], holding a row lock until commit.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// All orders, or only `user`'s, newest first.
    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: Option<UserUuid>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(user.map(UserUuid::into_uuid))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
        ready_at: Option<Timestamp>,
        completed_at: Option<Timestamp>,
    ) -> Result<OrderRecord, sqlx::Error> {
        query(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .bind(ready_at.map(SqlxTimestamp::from))
            .bind(completed_at.map(SqlxTimestamp::from))
            .execute(&mut **tx)
            .await?;

        self.get_order(tx, order).await
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Take ordered items out of the user's cart. Items added meanwhile stay.
    pub(crate) async fn remove_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        items: &[ItemUuid],
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REMOVE_CART_ITEMS_SQL)
            .bind(user.into_uuid())
            .bind(into_uuids(items))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Current records for the given ids; ids of deleted items are skipped.
    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        items: &[ItemUuid],
    ) -> Result<Vec<ItemRecord>, sqlx::Error> {
        query_as::<Postgres, ItemRecord>(LIST_ITEMS_SQL)
            .bind(into_uuids(items))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let item_count: i32 = row.try_get("item_count")?;
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            items: row
                .try_get::<Vec<Uuid>, _>("item_uuids")?
                .into_iter()
                .map(ItemUuid::from_uuid)
                .collect(),
            item_count: u32::try_from(item_count).map_err(|e| sqlx::Error::ColumnDecode {
                index: "item_count".to_string(),
                source: Box::new(e),
            })?,
            price: row.try_get("price")?,
            status: status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            placed_at: row.try_get::<SqlxTimestamp, _>("placed_at")?.to_jiff(),
            ready_at: row
                .try_get::<Option<SqlxTimestamp>, _>("ready_at")?
                .map(SqlxTimestamp::to_jiff),
            completed_at: row
                .try_get::<Option<SqlxTimestamp>, _>("completed_at")?
                .map(SqlxTimestamp::to_jiff),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
