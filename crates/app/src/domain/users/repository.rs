//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    orders::records::OrderUuid,
    users::{
        data::{NewUser, PreferencesUpdate},
        records::{UserCredentials, UserRecord, UserUuid},
    },
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const FIND_CREDENTIALS_SQL: &str = include_str!("sql/find_credentials.sql");
const GET_CREDENTIALS_SQL: &str = include_str!("sql/get_credentials.sql");
const FIND_TAKEN_IDENTITIES_SQL: &str = include_str!("sql/find_taken_identities.sql");
const UPDATE_PREFERENCES_SQL: &str = include_str!("sql/update_preferences.sql");
const LIST_NEW_ITEM_SUBSCRIBERS_SQL: &str = include_str!("sql/list_new_item_subscribers.sql");
const LIST_ORDER_UUIDS_SQL: &str = include_str!("sql/list_order_uuids.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
        password_hash: &str,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.username)
            .bind(&user.email)
            .bind(password_hash)
            .bind(user.is_staff)
            .bind(user.receive_emails_order_updates)
            .bind(user.receive_emails_new_items)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_credentials(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(FIND_CREDENTIALS_SQL)
            .bind(username)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_credentials(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserCredentials, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(GET_CREDENTIALS_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Whether the username and the email are already registered.
    pub(crate) async fn find_taken_identities(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
        email: &str,
    ) -> Result<(bool, bool), sqlx::Error> {
        query_as::<Postgres, (bool, bool)>(FIND_TAKEN_IDENTITIES_SQL)
            .bind(username)
            .bind(email)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_preferences(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        update: PreferencesUpdate,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(UPDATE_PREFERENCES_SQL)
            .bind(user.into_uuid())
            .bind(update.receive_emails_new_items)
            .bind(update.receive_emails_order_updates)
            .fetch_one(&mut **tx)
            .await
    }

    /// Email addresses of users who opted in to new item announcements.
    pub(crate) async fn list_new_item_subscribers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<String>, sqlx::Error> {
        query_scalar::<Postgres, String>(LIST_NEW_ITEM_SUBSCRIBERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_order_uuids(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderUuid>, sqlx::Error> {
        let uuids = query_scalar::<Postgres, Uuid>(LIST_ORDER_UUIDS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        Ok(uuids.into_iter().map(OrderUuid::from_uuid).collect())
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            is_staff: row.try_get("is_staff")?,
            receive_emails_order_updates: row.try_get("receive_emails_order_updates")?,
            receive_emails_new_items: row.try_get("receive_emails_new_items")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user: UserRecord::from_row(row)?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}
