//! Update Order Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rugs_app::domain::orders::records::OrderStatus;

use crate::{errors::ApiError, extensions::*, orders::models::OrderResponse};

/// Update Order Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderRequest {
    /// `pending`, `ready_for_pickup` or `complete`
    pub status: Option<String>,
}

fn parse_order_status(status: &str) -> Result<OrderStatus, ApiError> {
    status.parse().map_err(|_unknown| {
        ApiError::invalid("status", format!("\"{status}\" is not a valid choice."))
    })
}

/// Update Order Handler
///
/// The order's owner or staff set its status. Reaching `ready_for_pickup` or
/// `complete` stamps the matching time. An empty body changes nothing and
/// returns the order as it is.
#[endpoint(tags("orders"), summary = "Update Order", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, ApiError> {
    let state = depot.state()?;
    let principal = depot.principal_or_401()?;
    let order = order.into_inner().into();

    let Some(status) = json.into_inner().status else {
        let details = state.app.orders.get_order(&principal, order).await?;

        return Ok(Json(details.order.into()));
    };

    let status = parse_order_status(&status)?;

    let order = state
        .app
        .orders
        .update_status(&principal, order, status)
        .await?;

    Ok(Json(order.into()))
}
