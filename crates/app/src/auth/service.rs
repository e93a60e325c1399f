//! Auth service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use sqlx::PgPool;
use tracing::debug;

use crate::{
    auth::{
        ApiTokenMetadata, ApiTokenSecret, ApiTokenVersion, AuthServiceError, IssuedApiToken,
        NewApiToken, ParsedApiToken, TokenUuid, compute_verifier, format_api_token,
        parse_api_token, repository::PgAuthRepository, verifiers_match,
    },
    domain::{access::Principal, users::records::UserUuid},
};

/// Default bearer token lifetime.
pub const DEFAULT_TOKEN_TTL: SignedDuration = SignedDuration::from_secs(10 * 60 * 60);

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
    ttl: Option<SignedDuration>,
}

impl PgAuthService {
    /// Tokens expire `ttl` after issue; `None` issues non-expiring tokens.
    #[must_use]
    pub fn new(pool: PgPool, ttl: Option<SignedDuration>) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
            ttl,
        }
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    pub async fn revoke_api_token(&self, token: TokenUuid) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_api_token(token)
            .await
            .map(|record| record.is_some())
            .map_err(AuthServiceError::from)
    }

    pub async fn list_api_tokens(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        self.repository
            .list_api_tokens(user)
            .await
            .map_err(AuthServiceError::from)
    }

    /// Resolve a raw bearer token to its stored principal.
    async fn verify(&self, parsed: &ParsedApiToken) -> Result<Principal, AuthServiceError> {
        let token = self
            .repository
            .find_active_api_token(parsed.token_uuid, parsed.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let expected = compute_verifier(
            parsed.token_uuid,
            parsed.version,
            token.user_uuid,
            &parsed.secret,
        );

        if token.version != parsed.version || !verifiers_match(&token.token_hash, &expected) {
            return Err(AuthServiceError::NotFound);
        }

        Ok(Principal {
            user: token.user_uuid,
            is_staff: token.is_staff,
        })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        let parsed = parse_api_token(bearer_token).map_err(|error| {
            debug!(%error, "rejected malformed bearer token");
            AuthServiceError::NotFound
        })?;

        let principal = self.verify(&parsed).await?;

        // Best-effort metadata update; auth success should not depend on this write.
        let _touch_result = self
            .repository
            .touch_api_token_last_used(parsed.token_uuid)
            .await;

        Ok(principal)
    }

    async fn issue_token(&self, user: UserUuid) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = TokenUuid::new();
        let version = ApiTokenVersion::V1;
        let secret = ApiTokenSecret::generate();
        let token = format_api_token(token_uuid, version, &secret);

        let expires_at = self
            .ttl
            .and_then(|ttl| Timestamp::now().checked_add(ttl).ok());

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                user_uuid: user,
                version,
                token_hash: compute_verifier(token_uuid, version, user, &secret),
                expires_at,
            })
            .await?;

        Ok(IssuedApiToken { token, metadata })
    }

    async fn revoke_bearer(&self, bearer_token: &str) -> Result<(), AuthServiceError> {
        let parsed = parse_api_token(bearer_token).map_err(AuthServiceError::from)?;

        self.verify(&parsed).await?;

        if self.revoke_api_token(parsed.token_uuid).await? {
            Ok(())
        } else {
            Err(AuthServiceError::NotFound)
        }
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the principal it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError>;

    /// Issue a fresh bearer token for `user`.
    async fn issue_token(&self, user: UserUuid) -> Result<IssuedApiToken, AuthServiceError>;

    /// Revoke the presented bearer token (logout).
    async fn revoke_bearer(&self, bearer_token: &str) -> Result<(), AuthServiceError>;
}
