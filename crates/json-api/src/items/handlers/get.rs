//! Get Item Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{errors::ApiError, extensions::*, items::models::ItemResponse};

/// Get Item Handler
#[endpoint(tags("items"), summary = "Get Item")]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ItemResponse>, ApiError> {
    let state = depot.state()?;

    let item = state.app.items.get_item(item.into_inner().into()).await?;

    Ok(Json(item.into()))
}
