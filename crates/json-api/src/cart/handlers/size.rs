//! Cart Size Handler

use salvo::prelude::*;

use crate::{errors::ApiError, extensions::*};

/// Cart Size Handler
///
/// The number of items in the caller's cart, as a bare JSON number.
#[endpoint(tags("cart"), summary = "Cart Size", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<u64>, ApiError> {
    let state = depot.state()?;
    let principal = depot.principal_or_401()?;

    Ok(Json(state.app.carts.size(&principal).await?))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, customer};

    use super::*;

    #[tokio::test]
    async fn size_is_a_bare_number() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.carts.expect_size().once().return_once(|_| Ok(3));

        let mut res = TestClient::get("http://example.com/cart/size")
            .send(&mocks.service(Some(customer()), Router::with_path("cart/size").get(handler)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "3");

        Ok(())
    }
}
