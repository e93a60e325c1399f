//! Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{
    FromRow, Postgres, QueryBuilder, Row, Transaction, postgres::PgRow, query, query_as,
};

use crate::domain::items::{
    data::{ItemUpdate, ItemsQuery, NewItem},
    records::{ItemRecord, ItemStatus, ItemUuid},
};

const GET_ITEM_SQL: &str = include_str!("sql/get_item.sql");
const CREATE_ITEM_SQL: &str = include_str!("sql/create_item.sql");
const UPDATE_ITEM_SQL: &str = include_str!("sql/update_item.sql");
const DELETE_ITEM_SQL: &str = include_str!("sql/delete_item.sql");

const ITEM_COLUMNS: &str =
    "uuid, title, description, price, image_url, status, created_at, updated_at";

#[derive(Debug, Clone, Default)]
pub(crate) struct PgItemsRepository;

impl PgItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// One page of matching items plus the total match count.
    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        items_query: &ItemsQuery,
    ) -> Result<(Vec<ItemRecord>, i64), sqlx::Error> {
        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM items");

        push_filters(&mut count_query, items_query);

        let count = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&mut **tx)
            .await?;

        let mut page_query =
            QueryBuilder::<Postgres>::new(format!("SELECT {ITEM_COLUMNS} FROM items"));

        push_filters(&mut page_query, items_query);

        page_query
            .push(" ORDER BY ")
            .push(items_query.ordering.order_by_sql())
            .push(" LIMIT ")
            .push_bind(items_query.page.limit())
            .push(" OFFSET ")
            .push_bind(items_query.page.offset());

        let items = page_query
            .build_query_as::<ItemRecord>()
            .fetch_all(&mut **tx)
            .await?;

        Ok((items, count))
    }

    pub(crate) async fn get_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ItemUuid,
    ) -> Result<ItemRecord, sqlx::Error> {
        query_as::<Postgres, ItemRecord>(GET_ITEM_SQL)
            .bind(item.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: &NewItem,
    ) -> Result<ItemRecord, sqlx::Error> {
        query_as::<Postgres, ItemRecord>(CREATE_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(&item.title)
            .bind(&item.description)
            .bind(item.price.round_dp(2))
            .bind(item.image_url.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ItemUuid,
        update: &ItemUpdate,
    ) -> Result<ItemRecord, sqlx::Error> {
        let image_url = update.image_url.as_ref();

        query_as::<Postgres, ItemRecord>(UPDATE_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(update.title.as_deref())
            .bind(update.description.as_deref())
            .bind(update.price.map(|price| price.round_dp(2)))
            .bind(image_url.is_some())
            .bind(image_url.and_then(Option::as_deref))
            .bind(update.status.map(ItemStatus::as_str))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: ItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ITEM_SQL)
            .bind(item.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, items_query: &ItemsQuery) {
    builder.push(" WHERE TRUE");

    if let Some(status) = items_query.status {
        builder.push(" AND status = ").push_bind(status.as_str());
    }

    let search = items_query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|search| !search.is_empty());

    if let Some(search) = search {
        let pattern = format!("%{}%", escape_like(search));

        builder
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }

        escaped.push(ch);
    }

    escaped
}

pub(crate) fn decode_item_status(value: &str) -> Result<ItemStatus, sqlx::Error> {
    value.parse().map_err(|error| sqlx::Error::ColumnDecode {
        index: "status".to_string(),
        source: Box::new(error),
    })
}

impl<'r> FromRow<'r, PgRow> for ItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: ItemUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            price: row.try_get::<Decimal, _>("price")?,
            image_url: row.try_get("image_url")?,
            status: decode_item_status(&status)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
