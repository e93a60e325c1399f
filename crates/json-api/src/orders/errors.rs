//! Order Errors

use rugs_app::domain::orders::OrdersServiceError;

use crate::errors::ApiError;

impl From<OrdersServiceError> for ApiError {
    fn from(error: OrdersServiceError) -> Self {
        match error {
            OrdersServiceError::NotFound => ApiError::NotFound,
            OrdersServiceError::InvalidReference | OrdersServiceError::InvalidData => {
                ApiError::invalid("error", "Invalid order data")
            }
            OrdersServiceError::Validation(errors) | OrdersServiceError::ClaimConflict(errors) => {
                ApiError::Validation(errors)
            }
            OrdersServiceError::Access(error) => error.into(),
            OrdersServiceError::Sql(source) => ApiError::internal("orders storage error", &source),
        }
    }
}
