//! Delete Item Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{errors::ApiError, extensions::*};

/// Delete Item Handler
///
/// Staff only. The item leaves every cart; placed orders keep its id.
#[endpoint(
    tags("items"),
    summary = "Delete Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Item deleted"),
    ),
)]
pub(crate) async fn handler(item: PathParam<Uuid>, depot: &mut Depot) -> Result<StatusCode, ApiError> {
    let state = depot.state()?;
    let principal = depot.principal_or_401()?;

    state
        .app
        .items
        .delete_item(&principal, item.into_inner().into())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use rugs_app::domain::{
        access::AccessError,
        items::{ItemsServiceError, records::ItemUuid},
    };

    use crate::test_helpers::{Mocks, customer, staff};

    use super::*;

    fn route() -> Router {
        Router::with_path("items/{item}").delete(handler)
    }

    #[tokio::test]
    async fn staff_delete_returns_204() -> TestResult {
        let uuid = ItemUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .items
            .expect_delete_item()
            .once()
            .withf(move |principal, item| *principal == staff() && *item == uuid)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/items/{uuid}"))
            .send(&mocks.service(Some(staff()), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn customer_delete_returns_403() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .items
            .expect_delete_item()
            .once()
            .return_once(|_, _| Err(ItemsServiceError::Access(AccessError::Forbidden)));

        let res = TestClient::delete(format!("http://example.com/items/{}", ItemUuid::new()))
            .send(&mocks.service(Some(customer()), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
