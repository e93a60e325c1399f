//! Item Errors

use rugs_app::domain::items::ItemsServiceError;

use crate::errors::ApiError;

impl From<ItemsServiceError> for ApiError {
    fn from(error: ItemsServiceError) -> Self {
        match error {
            ItemsServiceError::AlreadyExists => ApiError::Conflict,
            ItemsServiceError::NotFound => ApiError::NotFound,
            ItemsServiceError::InvalidReference
            | ItemsServiceError::MissingRequiredData
            | ItemsServiceError::InvalidData => ApiError::invalid("error", "Invalid item data"),
            ItemsServiceError::Validation(errors) => ApiError::Validation(errors),
            ItemsServiceError::Access(error) => error.into(),
            ItemsServiceError::Notification(source) => {
                ApiError::internal("item created but new item emails failed", &source)
            }
            ItemsServiceError::Sql(source) => ApiError::internal("items storage error", &source),
        }
    }
}
