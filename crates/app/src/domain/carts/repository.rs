//! Carts Repository

use sqlx::{Postgres, Transaction, query, query_as, query_scalar};

use crate::domain::{
    items::records::{ItemRecord, ItemUuid},
    users::records::UserUuid,
};

const LIST_CART_ITEMS_SQL: &str = include_str!("sql/list_cart_items.sql");
const GET_CART_ITEM_SQL: &str = include_str!("sql/get_cart_item.sql");
const LOCK_ITEM_SQL: &str = include_str!("sql/lock_item.sql");
const ADD_CART_ITEM_SQL: &str = include_str!("sql/add_cart_item.sql");
const REMOVE_CART_ITEM_SQL: &str = include_str!("sql/remove_cart_item.sql");
const CLEAR_CART_SQL: &str = include_str!("sql/clear_cart.sql");
const COUNT_CART_ITEMS_SQL: &str = include_str!("sql/count_cart_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<ItemRecord>, sqlx::Error> {
        query_as::<Postgres, ItemRecord>(LIST_CART_ITEMS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: ItemUuid,
    ) -> Result<ItemRecord, sqlx::Error> {
        query_as::<Postgres, ItemRecord>(GET_CART_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(item.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Read an item, holding a share lock so its status can't flip before commit.
    pub(crate) async fn lock_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ItemUuid,
    ) -> Result<Option<ItemRecord>, sqlx::Error> {
        query_as::<Postgres, ItemRecord>(LOCK_ITEM_SQL)
            .bind(item.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Returns `false` when the item was already in the cart.
    pub(crate) async fn add_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: ItemUuid,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(ADD_CART_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(item.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    pub(crate) async fn remove_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: ItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REMOVE_CART_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(item.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn count_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_CART_ITEMS_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}
