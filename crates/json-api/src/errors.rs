//! API errors and how they are rendered.

use salvo::{
    Scribe,
    http::StatusCode,
    oapi::{self, EndpointOutRegister},
    prelude::*,
};
use tracing::error;

use rugs_app::domain::{access::AccessError, validation::ValidationErrors};

/// Everything a handler can fail with.
///
/// Validation failures carry a field map rendered as the JSON body. Every
/// other kind is answered with a bare status code.
#[derive(Debug)]
pub(crate) enum ApiError {
    Validation(ValidationErrors),
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Internal,
}

impl ApiError {
    /// Single-field validation error.
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(ValidationErrors::single(field, message))
    }

    /// Log `source` and answer 500.
    pub(crate) fn internal(context: &str, source: &dyn std::error::Error) -> Self {
        error!("{context}: {source}");

        Self::Internal
    }

    pub(crate) const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(error: AccessError) -> Self {
        match error {
            AccessError::Unauthorized => Self::Unauthorized,
            AccessError::Forbidden => Self::Forbidden,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status_code());

        match self {
            Self::Validation(errors) => res.render(Json(errors)),
            // an explicit empty body keeps the default error page out
            _ => {
                res.body(Vec::<u8>::new());
            }
        }
    }
}

impl EndpointOutRegister for ApiError {
    fn register(_components: &mut oapi::Components, operation: &mut oapi::Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Validation failed; body maps fields to messages"),
            (StatusCode::UNAUTHORIZED, "Missing or invalid bearer token"),
            (StatusCode::FORBIDDEN, "Not allowed for this principal"),
            (StatusCode::NOT_FOUND, "Not found"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        ] {
            operation
                .responses
                .insert(status.as_str(), oapi::Response::new(description));
        }
    }
}
