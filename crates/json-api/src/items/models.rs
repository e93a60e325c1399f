//! Item Models

use std::str::FromStr;

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rugs_app::domain::items::records::{ItemRecord, ItemStatus};

use crate::errors::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ItemResponse {
    pub uuid: Uuid,
    pub title: String,
    pub description: String,

    /// Decimal string, e.g. `"4.99"`
    pub price: String,

    pub image_url: Option<String>,

    /// `available` or `not_available`
    pub status: String,

    pub created_at: String,
    pub updated_at: String,
}

impl From<ItemRecord> for ItemResponse {
    fn from(item: ItemRecord) -> Self {
        ItemResponse {
            uuid: item.uuid.into(),
            title: item.title,
            description: item.description,
            price: item.price.to_string(),
            image_url: item.image_url,
            status: item.status.to_string(),
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

pub(crate) fn parse_price(price: &str) -> Result<Decimal, ApiError> {
    Decimal::from_str(price.trim())
        .map_err(|_invalid| ApiError::invalid("price", "A valid number is required."))
}

pub(crate) fn parse_status(status: &str) -> Result<ItemStatus, ApiError> {
    status.parse().map_err(|_unknown| {
        ApiError::invalid("status", format!("\"{status}\" is not a valid choice."))
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn prices_are_parsed_as_decimals() {
        assert!(matches!(parse_price(" 4.99 "), Ok(price) if price == Decimal::new(499, 2)));
        assert!(matches!(parse_price("cheap"), Err(ApiError::Validation(_))));
    }

    #[test]
    fn unknown_status_names_the_field() -> TestResult {
        let Err(ApiError::Validation(errors)) = parse_status("sold") else {
            return Err("expected a validation error".into());
        };

        assert_eq!(errors.get("status"), Some("\"sold\" is not a valid choice."));

        Ok(())
    }
}
