//! Update Preferences Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use rugs_app::domain::users::data::PreferencesUpdate;

use crate::{accounts::models::UserResponse, errors::ApiError, extensions::*};

/// Update Preferences Request
///
/// Omitted fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatePreferencesRequest {
    pub receive_emails_new_items: Option<bool>,
    pub receive_emails_order_updates: Option<bool>,
}

/// Update Preferences Handler
#[endpoint(tags("accounts"), summary = "Update Email Preferences", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    json: JsonBody<UpdatePreferencesRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, ApiError> {
    let state = depot.state()?;
    let principal = depot.principal_or_401()?;
    let request = json.into_inner();

    let user = state
        .app
        .users
        .update_preferences(
            &principal,
            PreferencesUpdate {
                receive_emails_new_items: request.receive_emails_new_items,
                receive_emails_order_updates: request.receive_emails_order_updates,
            },
        )
        .await?;

    Ok(Json(user.into()))
}
