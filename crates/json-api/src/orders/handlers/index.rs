//! Order Index Handler

use salvo::prelude::*;

use crate::{errors::ApiError, extensions::*, orders::models::OrderResponse};

/// Order Index Handler
///
/// Staff see every order, everyone else only their own. Newest first.
#[endpoint(tags("orders"), summary = "List Orders", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let state = depot.state()?;
    let principal = depot.principal_or_401()?;

    let orders = state.app.orders.list_orders(&principal).await?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
