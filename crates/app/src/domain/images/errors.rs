//! Images service errors.

use thiserror::Error;

use crate::backend::{BackendError, BackendErrorKind};

#[derive(Debug, Error)]
pub enum ImagesServiceError {
    #[error("an image already exists at this path")]
    AlreadyExists,

    #[error("not allowed to upload images")]
    Unauthorized,

    #[error("backend error")]
    Backend(#[source] BackendError),
}

impl From<BackendError> for ImagesServiceError {
    fn from(error: BackendError) -> Self {
        match error.kind() {
            BackendErrorKind::Unauthorized => Self::Unauthorized,
            BackendErrorKind::UniqueViolation => Self::AlreadyExists,
            _ => Self::Backend(error),
        }
    }
}
