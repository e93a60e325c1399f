//! Get Order Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{errors::ApiError, extensions::*, orders::models::OrderDetailsResponse};

/// Get Order Handler
///
/// The order with the current state of its items. Owner or staff only.
#[endpoint(tags("orders"), summary = "Get Order", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderDetailsResponse>, ApiError> {
    let state = depot.state()?;
    let principal = depot.principal_or_401()?;

    let details = state
        .app
        .orders
        .get_order(&principal, order.into_inner().into())
        .await?;

    Ok(Json(details.into()))
}
