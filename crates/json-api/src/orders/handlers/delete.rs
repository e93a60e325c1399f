//! Delete Order Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{errors::ApiError, extensions::*};

/// Delete Order Handler
///
/// Owner or staff. The order's items stay not available.
#[endpoint(
    tags("orders"),
    summary = "Delete Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Order deleted"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, ApiError> {
    let state = depot.state()?;
    let principal = depot.principal_or_401()?;

    state
        .app
        .orders
        .delete_order(&principal, order.into_inner().into())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
