//! Update Item Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use rugs_app::domain::items::data::ItemUpdate;

use crate::{
    errors::ApiError,
    extensions::*,
    items::models::{ItemResponse, parse_price, parse_status},
};

/// Update Item Request
///
/// Omitted fields are left unchanged. `image_url: null` removes the image.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,

    #[serde(default, deserialize_with = "present")]
    pub image_url: Option<Option<String>>,

    pub status: Option<String>,
}

/// Tell an explicit `null` apart from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateItemRequest {
    fn into_update(self) -> Result<ItemUpdate, ApiError> {
        Ok(ItemUpdate {
            title: self.title,
            description: self.description,
            price: self.price.as_deref().map(parse_price).transpose()?,
            image_url: self.image_url,
            status: self.status.as_deref().map(parse_status).transpose()?,
        })
    }
}

/// Update Item Handler
///
/// Staff only.
#[endpoint(tags("items"), summary = "Update Item", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    json: JsonBody<UpdateItemRequest>,
    depot: &mut Depot,
) -> Result<Json<ItemResponse>, ApiError> {
    let state = depot.state()?;
    let principal = depot.principal_or_401()?;
    let update = json.into_inner().into_update()?;

    let item = state
        .app
        .items
        .update_item(&principal, item.into_inner().into(), update)
        .await?;

    Ok(Json(item.into()))
}
