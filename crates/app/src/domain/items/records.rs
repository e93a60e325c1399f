//! Item Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Item UUID
pub type ItemUuid = TypedUuid<ItemRecord>;

/// Availability of an item for purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemStatus {
    Available,
    NotAvailable,
}

impl ItemStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::NotAvailable => "not_available",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown item status `{0}`")]
pub struct UnknownItemStatus(pub String);

impl FromStr for ItemStatus {
    type Err = UnknownItemStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "available" => Ok(Self::Available),
            "not_available" => Ok(Self::NotAvailable),
            other => Err(UnknownItemStatus(other.to_string())),
        }
    }
}

/// Item Record
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub uuid: ItemUuid,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub status: ItemStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ItemRecord {
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == ItemStatus::Available
    }
}

/// One page of a catalog listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemsPage {
    pub items: Vec<ItemRecord>,

    /// Matching items across all pages.
    pub count: u64,

    pub num_pages: u64,
}
