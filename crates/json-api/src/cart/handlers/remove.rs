//! Remove Cart Item Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{errors::ApiError, extensions::*};

/// Remove Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Item From Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Item is no longer in the cart"),
    ),
)]
pub(crate) async fn handler(item: PathParam<Uuid>, depot: &mut Depot) -> Result<StatusCode, ApiError> {
    let state = depot.state()?;
    let principal = depot.principal_or_401()?;

    state
        .app
        .carts
        .remove_item(&principal, item.into_inner().into())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
