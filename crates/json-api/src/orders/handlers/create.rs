//! Create Order Handler

use salvo::{http::header::LOCATION, prelude::*};

use rugs_app::domain::orders::OrdersServiceError;

use crate::{
    errors::ApiError,
    extensions::*,
    observability::{record_order_claim_conflict, record_order_placed},
    orders::models::OrderResponse,
};

/// Create Order Handler
///
/// Places an order for the caller's whole cart. Every item must still be
/// available; on success they are marked not available and the cart is
/// emptied. On any failure nothing changes.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, ApiError> {
    let state = depot.state()?;
    let principal = depot.principal_or_401()?;

    let order = match state.app.orders.create_order(&principal).await {
        Ok(order) => order,
        Err(OrdersServiceError::ClaimConflict(errors)) => {
            record_order_claim_conflict();

            return Err(ApiError::Validation(errors));
        }
        Err(error) => return Err(error.into()),
    };

    record_order_placed();

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
