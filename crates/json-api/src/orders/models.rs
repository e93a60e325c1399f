//! Order Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rugs_app::domain::orders::records::{OrderDetails, OrderRecord};

use crate::items::models::ItemResponse;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub user: Uuid,

    /// Item ids captured when the order was placed
    pub items: Vec<Uuid>,

    pub item_count: u32,

    /// Total captured when the order was placed
    pub price: String,

    /// `pending`, `ready_for_pickup` or `complete`
    pub status: String,

    pub placed_at: String,
    pub ready_at: Option<String>,
    pub completed_at: Option<String>,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            user: order.user_uuid.into(),
            items: order.items.into_iter().map(Into::into).collect(),
            item_count: order.item_count,
            price: order.price.to_string(),
            status: order.status.to_string(),
            placed_at: order.placed_at.to_string(),
            ready_at: order.ready_at.map(|at| at.to_string()),
            completed_at: order.completed_at.map(|at| at.to_string()),
        }
    }
}

/// An order with the current records of the items it still can resolve.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderDetailsResponse {
    pub order: OrderResponse,
    pub items: Vec<ItemResponse>,
}

impl From<OrderDetails> for OrderDetailsResponse {
    fn from(details: OrderDetails) -> Self {
        OrderDetailsResponse {
            order: details.order.into(),
            items: details.items.into_iter().map(Into::into).collect(),
        }
    }
}
