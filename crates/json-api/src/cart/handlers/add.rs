//! Add To Cart Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors::ApiError, extensions::*, items::models::ItemResponse};

/// Add To Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddToCartRequest {
    pub item: Uuid,
}

/// Add To Cart Handler
///
/// Adding an item already in the cart changes nothing. The item is not
/// reserved; placing an order is what claims it.
#[endpoint(
    tags("cart"),
    summary = "Add Item To Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Item is in the cart"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddToCartRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ItemResponse>, ApiError> {
    let state = depot.state()?;
    let principal = depot.principal_or_401()?;

    let item = state
        .app
        .carts
        .add_item(&principal, json.into_inner().item.into())
        .await?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}
