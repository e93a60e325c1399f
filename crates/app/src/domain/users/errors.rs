//! Users service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{
    auth::PasswordError,
    domain::{access::AccessError, validation::ValidationErrors},
};

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("user already exists")]
    AlreadyExists,

    #[error("user not found")]
    NotFound,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("invalid data")]
    InvalidData,

    #[error("invalid user: {0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("password hashing failed")]
    Password(#[from] PasswordError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<ValidationErrors> for UsersServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<Error> for UsersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
