//! Admin console errors.

use thiserror::Error;

use achei::{hours::HoursError, import::ImportError, variants::VariantError};

use achei::stores::AccountUuid;

use crate::domain::{
    advertisements::AdvertisementsServiceError, images::ImagesServiceError,
    products::ProductsServiceError, stores::StoresServiceError,
};

/// A form rejected before anything is sent to the backend.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("whatsapp must have between 10 and 20 characters")]
    WhatsappLength,

    #[error("price must be greater than zero")]
    NonPositivePrice,

    #[error("invalid image url: {0}")]
    InvalidImageUrl(String),

    #[error("file {0:?} has no extension")]
    MissingExtension(String),

    #[error(transparent)]
    Hours(#[from] HoursError),

    #[error(transparent)]
    Variants(#[from] VariantError),
}

#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("store request failed")]
    Stores(#[from] StoresServiceError),

    #[error("product request failed")]
    Products(#[from] ProductsServiceError),

    #[error("image upload failed")]
    Images(#[from] ImagesServiceError),

    #[error("account {0} is not an administrator")]
    NotAdmin(AccountUuid),

    #[error("advertisement request failed")]
    Advertisements(#[from] AdvertisementsServiceError),
}
