use thiserror::Error;

/// Why a create request was refused before anything was written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Missing or blank required field, over-long text, or unknown enum value
    #[error("{0}")]
    InvalidInput(String),
    /// A foreign key names a row that does not exist
    #[error("{0}")]
    ReferenceNotFound(String),
}

impl ValidationError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ValidationError::InvalidInput(message.into())
    }

    pub fn missing_reference(message: impl Into<String>) -> Self {
        ValidationError::ReferenceNotFound(message.into())
    }
}

#[derive(Debug, Error)]
pub enum ClinicError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type ClinicResult<T> = Result<T, ClinicError>;
