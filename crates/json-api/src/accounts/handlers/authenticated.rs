//! Authenticated Profile Handler

use salvo::prelude::*;

use crate::{accounts::models::ProfileResponse, errors::ApiError, extensions::*};

/// Authenticated Profile Handler
///
/// The caller's account, preferences and order ids.
#[endpoint(tags("accounts"), summary = "Current User", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProfileResponse>, ApiError> {
    let state = depot.state()?;
    let principal = depot.principal_or_401()?;

    let profile = state.app.users.get_profile(&principal).await?;

    Ok(Json(profile.into()))
}
