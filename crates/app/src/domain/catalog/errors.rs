//! Catalog service errors.

use thiserror::Error;

use crate::backend::{BackendError, BackendErrorKind};

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("product not found")]
    NotFound,

    #[error("not allowed to read the catalog")]
    Unauthorized,

    #[error("backend error")]
    Backend(#[source] BackendError),
}

impl From<BackendError> for CatalogServiceError {
    fn from(error: BackendError) -> Self {
        match error.kind() {
            BackendErrorKind::NotFound => Self::NotFound,
            BackendErrorKind::Unauthorized => Self::Unauthorized,
            _ => Self::Backend(error),
        }
    }
}
