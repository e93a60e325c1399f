//! Clear Cart Handler

use salvo::prelude::*;

use crate::{errors::ApiError, extensions::*};

/// Clear Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Empty Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Cart emptied"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, ApiError> {
    let state = depot.state()?;
    let principal = depot.principal_or_401()?;

    state.app.carts.clear(&principal).await?;

    Ok(StatusCode::NO_CONTENT)
}
