//! CLI errors.

use std::io;

use thiserror::Error;

use achei::{
    cart::{CartError, storage::CartStorageError},
    products::ProductUuid,
};
use achei_app::{
    admin::AdminError,
    domain::{
        advertisements::AdvertisementsServiceError, catalog::CatalogServiceError,
        notifications::NotificationsServiceError, products::ProductsServiceError,
        stores::StoresServiceError,
    },
};

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("backend is not configured: set ACHEI_BACKEND_URL and ACHEI_ANON_KEY")]
    BackendNotConfigured,

    #[error("product {0} is not in the catalog")]
    UnknownProduct(ProductUuid),

    #[error("no variant of this product matches the chosen color and size")]
    UnknownVariant,

    #[error("could not read {path}")]
    ReadFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("could not write output")]
    Output(#[from] io::Error),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    CartStorage(#[from] CartStorageError),

    #[error("catalog request failed")]
    Catalog(#[from] CatalogServiceError),

    #[error("store request failed")]
    Stores(#[from] StoresServiceError),

    #[error("products request failed")]
    Products(#[from] ProductsServiceError),

    #[error("notifications request failed")]
    Notifications(#[from] NotificationsServiceError),

    #[error("advertisements request failed")]
    Advertisements(#[from] AdvertisementsServiceError),

    #[error(transparent)]
    Admin(#[from] AdminError),
}
