//! App Context

use std::sync::Arc;

use crate::{
    backend::{BackendClient, BackendConfig},
    domain::{
        advertisements::{AdvertisementsService, HttpAdvertisementsService},
        catalog::{CatalogService, HttpCatalogService},
        images::{HttpImagesService, ImagesService},
        notifications::{HttpNotificationsService, NotificationsService},
        products::{HttpProductsService, ProductsService},
        stores::{HttpStoresService, StoresService},
    },
};

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub stores: Arc<dyn StoresService>,
    pub products: Arc<dyn ProductsService>,
    pub notifications: Arc<dyn NotificationsService>,
    pub images: Arc<dyn ImagesService>,
    pub advertisements: Arc<dyn AdvertisementsService>,
}

impl AppContext {
    /// Build application context over one backend connection.
    ///
    /// Images are stored in `image_bucket`.
    #[must_use]
    pub fn from_backend(config: BackendConfig, image_bucket: &str) -> Self {
        let backend = BackendClient::new(config);

        Self {
            catalog: Arc::new(HttpCatalogService::new(backend.clone())),
            stores: Arc::new(HttpStoresService::new(backend.clone())),
            products: Arc::new(HttpProductsService::new(backend.clone())),
            notifications: Arc::new(HttpNotificationsService::new(backend.clone())),
            advertisements: Arc::new(HttpAdvertisementsService::new(backend.clone())),
            images: Arc::new(HttpImagesService::new(backend, image_bucket)),
        }
    }
}
