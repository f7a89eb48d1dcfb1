use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::logic::{ClinicError, ValidationError};

impl IntoResponse for ClinicError {
    fn into_response(self) -> Response {
        match self {
            ClinicError::Validation(ValidationError::InvalidInput(reason))
            | ClinicError::Validation(ValidationError::ReferenceNotFound(reason)) => {
                log::debug!("Rejected request: {}", reason);
                (StatusCode::BAD_REQUEST, reason).into_response()
            }
            ClinicError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ClinicError::Storage(e) => {
                log::error!("Storage failure: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Malformed bodies are reported as 400 with a readable reason instead of axum's 422.
impl From<JsonRejection> for ClinicError {
    fn from(rejection: JsonRejection) -> Self {
        ClinicError::Validation(ValidationError::InvalidInput(rejection.body_text()))
    }
}

/// An id segment that is not a valid identifier cannot name a stored record.
impl From<PathRejection> for ClinicError {
    fn from(rejection: PathRejection) -> Self {
        log::debug!("Unmatched resource id: {}", rejection.body_text());
        ClinicError::NotFound
    }
}
