//! Verify Password Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{errors::ApiError, extensions::*};

/// Verify Password Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyPasswordRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyPasswordResponse {
    pub password: String,
}

/// Verify Password Handler
///
/// Re-checks the caller's own password, e.g. before a sensitive change.
#[endpoint(tags("accounts"), summary = "Verify Password", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    json: JsonBody<VerifyPasswordRequest>,
    depot: &mut Depot,
) -> Result<Json<VerifyPasswordResponse>, ApiError> {
    let state = depot.state()?;
    let principal = depot.principal_or_401()?;

    let valid = state
        .app
        .users
        .verify_password(&principal, &json.into_inner().password)
        .await?;

    if !valid {
        return Err(ApiError::invalid("password", "Invalid password"));
    }

    Ok(Json(VerifyPasswordResponse {
        password: "Valid password".to_string(),
    }))
}
