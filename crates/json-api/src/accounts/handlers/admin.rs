//! Admin Profile Handler

use salvo::prelude::*;

use crate::{accounts::models::ProfileResponse, errors::ApiError, extensions::*};

/// Admin Profile Handler
///
/// Same view as the authenticated profile, for staff only.
#[endpoint(tags("accounts"), summary = "Current Admin", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProfileResponse>, ApiError> {
    let state = depot.state()?;
    let principal = depot.principal_or_401()?;

    let profile = state.app.users.get_admin_profile(&principal).await?;

    Ok(Json(profile.into()))
}
