//! Login Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{accounts::models::SessionResponse, errors::ApiError, extensions::*};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

/// Login Handler
///
/// Exchanges a username and password for a bearer token.
#[endpoint(tags("accounts"), summary = "Login")]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<SessionResponse>, ApiError> {
    let state = depot.state()?;
    let LoginRequest { username, password } = json.into_inner();

    let user = state.app.users.authenticate(&username, &password).await?;
    let issued = state.app.auth.issue_token(user.uuid).await?;

    Ok(Json(SessionResponse::new(user, issued)))
}
