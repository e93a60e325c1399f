//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{access::AccessError, validation::ValidationErrors};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("item not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid cart change: {0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<ValidationErrors> for CartsServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
