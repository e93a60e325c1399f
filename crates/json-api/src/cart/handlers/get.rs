//! Get Cart Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{errors::ApiError, extensions::*, items::models::ItemResponse};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// Items in the cart, most recently added first
    pub cart: Vec<ItemResponse>,

    /// Sum of the current item prices
    pub price: String,
}

/// Get Cart Handler
#[endpoint(tags("cart"), summary = "Get Cart", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, ApiError> {
    let state = depot.state()?;
    let principal = depot.principal_or_401()?;

    let cart = state.app.carts.get_cart(&principal).await?;

    Ok(Json(CartResponse {
        price: cart.total.to_string(),
        cart: cart.items.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use rugs_app::domain::{carts::records::Cart, items::records::ItemUuid};

    use crate::test_helpers::{Mocks, customer, make_item};

    use super::*;

    #[tokio::test]
    async fn cart_lists_items_with_a_total() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_get_cart()
            .once()
            .withf(|principal| *principal == customer())
            .return_once(|_| {
                Ok(Cart::new(vec![
                    make_item(ItemUuid::new(), "Kilim", Decimal::new(499, 2)),
                    make_item(ItemUuid::new(), "Dhurrie", Decimal::new(599, 2)),
                ]))
            });

        let mut res = TestClient::get("http://example.com/cart")
            .send(&mocks.service(Some(customer()), Router::with_path("cart").get(handler)))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.cart.len(), 2);
        assert_eq!(body.price, "10.98");

        Ok(())
    }

    #[tokio::test]
    async fn anonymous_cart_returns_401() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.carts.expect_get_cart().never();

        let res = TestClient::get("http://example.com/cart")
            .send(&mocks.service(None, Router::with_path("cart").get(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
