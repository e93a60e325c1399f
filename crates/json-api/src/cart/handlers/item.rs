//! Get Cart Item Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{errors::ApiError, extensions::*, items::models::ItemResponse};

/// Get Cart Item Handler
///
/// 404 unless the item is in the caller's cart.
#[endpoint(tags("cart"), summary = "Get Cart Item", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ItemResponse>, ApiError> {
    let state = depot.state()?;
    let principal = depot.principal_or_401()?;

    let item = state
        .app
        .carts
        .get_item(&principal, item.into_inner().into())
        .await?;

    Ok(Json(item.into()))
}
