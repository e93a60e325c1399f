//! Items service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{
    domain::{access::AccessError, validation::ValidationErrors},
    notifications::NotificationError,
};

#[derive(Debug, Error)]
pub enum ItemsServiceError {
    #[error("item already exists")]
    AlreadyExists,

    #[error("item not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("invalid item: {0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("item created but notifications failed")]
    Notification(#[source] NotificationError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<ValidationErrors> for ItemsServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<NotificationError> for ItemsServiceError {
    fn from(error: NotificationError) -> Self {
        Self::Notification(error)
    }
}

impl From<Error> for ItemsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            ItemsServiceError::from(Error::RowNotFound),
            ItemsServiceError::NotFound
        ));
    }

    #[test]
    fn other_errors_are_storage_errors() {
        assert!(matches!(
            ItemsServiceError::from(Error::PoolTimedOut),
            ItemsServiceError::Sql(_)
        ));
    }
}
