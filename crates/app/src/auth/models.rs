//! Auth data models.

use jiff::Timestamp;

use crate::{auth::ApiTokenVersion, domain::users::records::UserUuid, uuids::TypedUuid};

/// Token UUID
pub type TokenUuid = TypedUuid<ApiTokenMetadata>;

/// Token data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveApiToken {
    pub user_uuid: UserUuid,
    pub is_staff: bool,
    pub version: ApiTokenVersion,

    /// SHA-256 verifier of the token secret material.
    pub token_hash: String,
}

/// Token metadata persisted in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiTokenMetadata {
    pub uuid: TokenUuid,
    pub user_uuid: UserUuid,
    pub version: ApiTokenVersion,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// New token persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewApiToken {
    pub uuid: TokenUuid,
    pub user_uuid: UserUuid,
    pub version: ApiTokenVersion,
    pub token_hash: String,
    pub expires_at: Option<Timestamp>,
}

/// Token issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedApiToken {
    pub token: String,
    pub metadata: ApiTokenMetadata,
}
