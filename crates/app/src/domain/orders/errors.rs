//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{access::AccessError, validation::ValidationErrors};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("invalid order: {0}")]
    Validation(ValidationErrors),

    /// Another order claimed one of the cart's items first.
    #[error("order lost an item to a concurrent order: {0}")]
    ClaimConflict(ValidationErrors),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl OrdersServiceError {
    /// Field errors for client-facing rejections.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) | Self::ClaimConflict(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for OrdersServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
