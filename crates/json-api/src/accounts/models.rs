//! Account Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rugs_app::{
    auth::IssuedApiToken,
    domain::users::records::{UserProfile, UserRecord},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub receive_emails_order_updates: bool,
    pub receive_emails_new_items: bool,
    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            username: user.username,
            email: user.email,
            is_staff: user.is_staff,
            receive_emails_order_updates: user.receive_emails_order_updates,
            receive_emails_new_items: user.receive_emails_new_items,
            created_at: user.created_at.to_string(),
        }
    }
}

/// A user with the ids of the orders they own.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,

    pub orders: Vec<Uuid>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        ProfileResponse {
            user: profile.user.into(),
            orders: profile.orders.into_iter().map(Into::into).collect(),
        }
    }
}

/// A freshly issued bearer token. The token is only ever shown here.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    pub user: UserResponse,
    pub token: String,
    pub expires_at: Option<String>,
}

impl SessionResponse {
    pub(crate) fn new(user: UserRecord, issued: IssuedApiToken) -> Self {
        SessionResponse {
            user: user.into(),
            token: issued.token,
            expires_at: issued.metadata.expires_at.map(|at| at.to_string()),
        }
    }
}
