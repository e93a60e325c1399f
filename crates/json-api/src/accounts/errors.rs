//! Account Errors

use rugs_app::{auth::AuthServiceError, domain::users::UsersServiceError};

use crate::errors::ApiError;

impl From<UsersServiceError> for ApiError {
    fn from(error: UsersServiceError) -> Self {
        match error {
            UsersServiceError::AlreadyExists => ApiError::Conflict,
            UsersServiceError::NotFound => ApiError::NotFound,
            UsersServiceError::InvalidCredentials => ApiError::invalid("error", "cannot login"),
            UsersServiceError::InvalidData => ApiError::invalid("error", "Invalid user data"),
            UsersServiceError::Validation(errors) => ApiError::Validation(errors),
            UsersServiceError::Access(error) => error.into(),
            UsersServiceError::Password(source) => {
                ApiError::internal("password hashing failed", &source)
            }
            UsersServiceError::Sql(source) => ApiError::internal("users storage error", &source),
        }
    }
}

impl From<AuthServiceError> for ApiError {
    fn from(error: AuthServiceError) -> Self {
        match error {
            AuthServiceError::NotFound => ApiError::Unauthorized,
            AuthServiceError::Sql(source) => ApiError::internal("tokens storage error", &source),
            AuthServiceError::Token(source) => {
                ApiError::internal("failed to process api token", &source)
            }
        }
    }
}
