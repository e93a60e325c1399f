//! Cart Records

use rust_decimal::Decimal;

use crate::domain::items::records::ItemRecord;

/// A user's cart, newest addition first.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub items: Vec<ItemRecord>,

    /// Sum of the current prices of `items`.
    pub total: Decimal,
}

impl Cart {
    #[must_use]
    pub fn new(items: Vec<ItemRecord>) -> Self {
        let total = items.iter().map(|item| item.price).sum();

        Self { items, total }
    }
}
