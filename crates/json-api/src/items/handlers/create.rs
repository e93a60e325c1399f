//! Create Item Handler

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use rugs_app::domain::{
    items::{data::NewItem, records::ItemUuid},
    validation::ValidationErrors,
};

use crate::{
    errors::ApiError,
    extensions::*,
    items::models::{ItemResponse, parse_price},
};

const REQUIRED: &str = "This field is required.";

/// Create Item Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,

    /// Decimal string, e.g. `"4.99"`
    pub price: Option<String>,

    pub image_url: Option<String>,
}

impl CreateItemRequest {
    fn into_new_item(self) -> Result<NewItem, ApiError> {
        let mut errors = ValidationErrors::new();

        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("price", &self.price),
        ] {
            if value.is_none() {
                errors.add(field, REQUIRED);
            }
        }

        errors.into_result()?;

        Ok(NewItem {
            uuid: ItemUuid::new(),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            price: parse_price(self.price.as_deref().unwrap_or_default())?,
            image_url: self.image_url,
        })
    }
}

/// Create Item Handler
///
/// Staff only. Subscribed users are emailed about the new item.
#[endpoint(
    tags("items"),
    summary = "Create Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Item created"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ItemResponse>, ApiError> {
    let state = depot.state()?;
    let principal = depot.principal_or_401()?;
    let item = json.into_inner().into_new_item()?;

    let item = state.app.items.create_item(&principal, item).await?;

    res.add_header(LOCATION, format!("/items/{}", item.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(item.into()))
}
