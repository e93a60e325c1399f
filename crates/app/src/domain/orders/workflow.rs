//! Order placement and status rules, free of storage concerns.

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::{
    items::records::{ItemStatus, ItemUuid},
    orders::records::OrderStatus,
    validation::ValidationErrors,
};

pub const EMPTY_CART: &str = "no items in cart";
pub const MISSING_ITEMS: &str = "one or more items in order does not exist";
pub const UNAVAILABLE_ITEMS: &str = "one or more items in order is not available";

/// An item referenced by the cart, as seen under lock at placement time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub item: ItemUuid,

    /// Current status and price, `None` when the item no longer exists.
    pub current: Option<(ItemStatus, Decimal)>,
}

/// The frozen snapshot an order is created from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPlan {
    pub items: Vec<ItemUuid>,
    pub price: Decimal,
}

impl OrderPlan {
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Check every line and compute the snapshot. Any bad line rejects the whole cart.
pub fn plan_order(lines: &[CartLine]) -> Result<OrderPlan, ValidationErrors> {
    if lines.is_empty() {
        return Err(ValidationErrors::single("cart", EMPTY_CART));
    }

    let mut items = Vec::with_capacity(lines.len());
    let mut price = Decimal::ZERO;

    for line in lines {
        match line.current {
            None => return Err(ValidationErrors::single("items", MISSING_ITEMS)),
            Some((ItemStatus::NotAvailable, _)) => {
                return Err(ValidationErrors::single("items", UNAVAILABLE_ITEMS));
            }
            Some((ItemStatus::Available, item_price)) => {
                items.push(line.item);
                price += item_price;
            }
        }
    }

    Ok(OrderPlan { items, price })
}

/// Ready and completion timestamps after moving to `status` at `now`.
///
/// Transitions are not checked; moving backwards keeps previously set timestamps.
#[must_use]
pub fn status_timestamps(
    status: OrderStatus,
    ready_at: Option<Timestamp>,
    completed_at: Option<Timestamp>,
    now: Timestamp,
) -> (Option<Timestamp>, Option<Timestamp>) {
    match status {
        OrderStatus::Pending => (ready_at, completed_at),
        OrderStatus::ReadyForPickup => (Some(now), completed_at),
        OrderStatus::Complete => (ready_at, Some(now)),
    }
}
