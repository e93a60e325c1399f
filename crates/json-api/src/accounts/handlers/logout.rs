//! Logout Handler

use salvo::prelude::*;

use crate::{auth::extract_bearer_token, errors::ApiError, extensions::*};

/// Logout Handler
///
/// Revokes the bearer token the request was made with.
#[endpoint(
    tags("accounts"),
    summary = "Logout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Token revoked"),
    ),
)]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Result<StatusCode, ApiError> {
    let state = depot.state()?;
    depot.principal_or_401()?;

    let token = extract_bearer_token(req)
        .map(ToOwned::to_owned)
        .ok_or(ApiError::Unauthorized)?;

    state.app.auth.revoke_bearer(&token).await?;

    Ok(StatusCode::NO_CONTENT)
}
