//! Cart Errors

use rugs_app::domain::carts::CartsServiceError;

use crate::errors::ApiError;

impl From<CartsServiceError> for ApiError {
    fn from(error: CartsServiceError) -> Self {
        match error {
            CartsServiceError::NotFound => ApiError::NotFound,
            CartsServiceError::InvalidReference => ApiError::invalid("item", "item does not exist"),
            CartsServiceError::Validation(errors) => ApiError::Validation(errors),
            CartsServiceError::Access(error) => error.into(),
            CartsServiceError::Sql(source) => ApiError::internal("cart storage error", &source),
        }
    }
}
