//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::{
    auth::{
        ActiveApiToken, ApiTokenMetadata, ApiTokenVersion, NewApiToken, TokenUuid,
    },
    domain::users::records::UserUuid,
};

const CREATE_TOKEN_SQL: &str = include_str!("sql/create_token.sql");
const FIND_ACTIVE_TOKEN_SQL: &str = include_str!("sql/find_active_token.sql");
const TOUCH_TOKEN_SQL: &str = include_str!("sql/touch_token.sql");
const REVOKE_TOKEN_SQL: &str = include_str!("sql/revoke_token.sql");
const LIST_TOKENS_SQL: &str = include_str!("sql/list_tokens.sql");

#[derive(Debug, Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_api_token(
        &self,
        token: &NewApiToken,
    ) -> Result<ApiTokenMetadata, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(CREATE_TOKEN_SQL)
            .bind(token.uuid.into_uuid())
            .bind(token.user_uuid.into_uuid())
            .bind(token.version.as_i16())
            .bind(&token.token_hash)
            .bind(token.expires_at.map(SqlxTimestamp::from))
            .fetch_one(&self.pool)
            .await
    }

    /// Unrevoked, unexpired token with the given id and version.
    pub(crate) async fn find_active_api_token(
        &self,
        token: TokenUuid,
        version: ApiTokenVersion,
    ) -> Result<Option<ActiveApiToken>, sqlx::Error> {
        query_as::<Postgres, ActiveApiToken>(FIND_ACTIVE_TOKEN_SQL)
            .bind(token.into_uuid())
            .bind(version.as_i16())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn touch_api_token_last_used(
        &self,
        token: TokenUuid,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_TOKEN_SQL)
            .bind(token.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Revoke a token. `None` when it was unknown or already revoked.
    pub async fn revoke_api_token(
        &self,
        token: TokenUuid,
    ) -> Result<Option<ApiTokenMetadata>, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(REVOKE_TOKEN_SQL)
            .bind(token.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list_api_tokens(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(LIST_TOKENS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&self.pool)
            .await
    }
}

fn decode_version(row: &PgRow) -> sqlx::Result<ApiTokenVersion> {
    ApiTokenVersion::try_from(row.try_get::<i16, _>("version")?).map_err(|error| {
        sqlx::Error::ColumnDecode {
            index: "version".to_string(),
            source: Box::new(error),
        }
    })
}

impl<'r> FromRow<'r, PgRow> for ActiveApiToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            is_staff: row.try_get("is_staff")?,
            version: decode_version(row)?,
            token_hash: row.try_get("token_hash")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ApiTokenMetadata {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TokenUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            version: decode_version(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_used_at")?
                .map(SqlxTimestamp::to_jiff),
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
