//! Item Index Handler

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use rugs_app::domain::items::data::{ItemOrdering, ItemsQuery, Page};

use crate::{
    errors::ApiError,
    extensions::*,
    items::models::{ItemResponse, parse_status},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ItemsPageResponse {
    /// Items matching the filters, across all pages
    pub count: u64,
    pub num_pages: u64,
    pub results: Vec<ItemResponse>,
}

/// Item Index Handler
///
/// Lists the catalog. Open to everyone.
#[endpoint(tags("items"), summary = "List Items")]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    search: QueryParam<String, false>,
    ordering: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ItemsPageResponse>, ApiError> {
    let state = depot.state()?;

    let query = ItemsQuery {
        status: status.into_inner().as_deref().map(parse_status).transpose()?,
        search: search.into_inner().filter(|search| !search.trim().is_empty()),
        ordering: ordering
            .into_inner()
            .as_deref()
            .map(str::parse::<ItemOrdering>)
            .transpose()?
            .unwrap_or_default(),
        page: Page::new(page.into_inner(), page_size.into_inner()),
    };

    let page = state.app.items.list_items(query).await?;

    Ok(Json(ItemsPageResponse {
        count: page.count,
        num_pages: page.num_pages,
        results: page.items.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::Value;
    use testresult::TestResult;

    use rugs_app::domain::items::{
        ItemsServiceError,
        records::{ItemStatus, ItemUuid, ItemsPage},
    };

    use crate::test_helpers::{Mocks, make_item, storage_error};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(None, Router::with_path("items").get(handler))
    }

    #[tokio::test]
    async fn anonymous_listing_returns_a_page() -> TestResult {
        let item = make_item(ItemUuid::new(), "Kilim", Decimal::new(499, 2));
        let uuid = item.uuid;

        let mut mocks = Mocks::default();

        mocks
            .items
            .expect_list_items()
            .once()
            .withf(|query| *query == ItemsQuery::default())
            .return_once(move |_| {
                Ok(ItemsPage {
                    items: vec![item],
                    count: 1,
                    num_pages: 1,
                })
            });

        let mut res = TestClient::get("http://example.com/items")
            .send(&make_service(mocks))
            .await;

        let body: ItemsPageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.count, 1);
        assert_eq!(body.results[0].uuid, uuid.into_uuid());
        assert_eq!(body.results[0].price, "4.99");
        assert_eq!(body.results[0].status, "available");

        Ok(())
    }

    #[tokio::test]
    async fn query_parameters_are_passed_through() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .items
            .expect_list_items()
            .once()
            .withf(|query| {
                *query
                    == ItemsQuery {
                        status: Some(ItemStatus::Available),
                        search: Some("wool".to_string()),
                        ordering: ItemOrdering::PriceDesc,
                        page: Page::new(Some(2), Some(5)),
                    }
            })
            .return_once(|_| {
                Ok(ItemsPage {
                    items: Vec::new(),
                    count: 6,
                    num_pages: 2,
                })
            });

        let res = TestClient::get(
            "http://example.com/items?status=available&search=wool&ordering=-price&page=2&page_size=5",
        )
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_ordering_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.items.expect_list_items().never();

        let mut res = TestClient::get("http://example.com/items?ordering=colour")
            .send(&make_service(mocks))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(body.get("ordering").is_some());

        Ok(())
    }

    #[tokio::test]
    async fn storage_failure_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .items
            .expect_list_items()
            .once()
            .return_once(|_| Err(ItemsServiceError::Sql(storage_error())));

        let res = TestClient::get("http://example.com/items")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
