//! Order Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{
        items::records::{ItemRecord, ItemUuid},
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Pickup workflow state. Intended order is `Pending`, `ReadyForPickup`, `Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    ReadyForPickup,
    Complete,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::ReadyForPickup => "ready_for_pickup",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status `{0}`")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "ready_for_pickup" => Ok(Self::ReadyForPickup),
            "complete" => Ok(Self::Complete),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// Order Record
///
/// `items`, `item_count` and `price` are frozen when the order is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub items: Vec<ItemUuid>,
    pub item_count: u32,
    pub price: Decimal,
    pub status: OrderStatus,
    pub placed_at: Timestamp,
    pub ready_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}

/// An order with the current state of the items it references.
///
/// Items deleted since the order was placed are absent from `items`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub order: OrderRecord,
    pub items: Vec<ItemRecord>,
}
