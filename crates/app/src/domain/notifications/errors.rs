//! Notifications service errors.

use thiserror::Error;

use crate::backend::{BackendError, BackendErrorKind};

#[derive(Debug, Error)]
pub enum NotificationsServiceError {
    #[error("notification not found")]
    NotFound,

    #[error("not allowed to read this store's notifications")]
    Unauthorized,

    #[error("backend error")]
    Backend(#[source] BackendError),
}

impl From<BackendError> for NotificationsServiceError {
    fn from(error: BackendError) -> Self {
        match error.kind() {
            BackendErrorKind::NotFound => Self::NotFound,
            BackendErrorKind::Unauthorized => Self::Unauthorized,
            _ => Self::Backend(error),
        }
    }
}
