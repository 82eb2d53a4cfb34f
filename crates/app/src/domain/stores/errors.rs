//! Stores service errors.

use thiserror::Error;

use crate::backend::{BackendError, BackendErrorKind};

#[derive(Debug, Error)]
pub enum StoresServiceError {
    #[error("store already exists")]
    AlreadyExists,

    #[error("store not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("not allowed to change this store")]
    Unauthorized,

    #[error("backend error")]
    Backend(#[source] BackendError),
}

impl From<BackendError> for StoresServiceError {
    fn from(error: BackendError) -> Self {
        match error.kind() {
            BackendErrorKind::UniqueViolation => Self::AlreadyExists,
            BackendErrorKind::ForeignKeyViolation => Self::InvalidReference,
            BackendErrorKind::NotNullViolation => Self::MissingRequiredData,
            BackendErrorKind::CheckViolation => Self::InvalidData,
            BackendErrorKind::NotFound => Self::NotFound,
            BackendErrorKind::Unauthorized => Self::Unauthorized,
            BackendErrorKind::Other => Self::Backend(error),
        }
    }
}
