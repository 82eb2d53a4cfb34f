//! Store Admin Console
//!
//! Lojista-facing catalog management. Every operation validates its input
//! before talking to the backend, so a rejected form never leaves a partial
//! write behind.

use std::{fmt, path::Path, sync::Arc};

use tracing::info;
use uuid::Uuid;

use achei::{
    import,
    products::{Product, ProductUuid, ProductVariant},
    stores::{AccountUuid, Store, StoreUuid},
};

use crate::{
    context::AppContext,
    domain::{images::ImagesService, products::ProductsService, stores::StoresService},
};

pub mod ads;
pub mod drafts;
pub mod errors;

pub use ads::AdvertisementDesk;
pub use drafts::{AdvertisementDraft, ProductDraft, StoreDraft, VariantDraft};
pub use errors::{AdminError, DraftError};

/// Catalog management for one lojista.
#[derive(Clone)]
pub struct AdminConsole {
    stores: Arc<dyn StoresService>,
    products: Arc<dyn ProductsService>,
    images: Arc<dyn ImagesService>,
}

impl fmt::Debug for AdminConsole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConsole").finish_non_exhaustive()
    }
}

impl AdminConsole {
    #[must_use]
    pub fn new(
        stores: Arc<dyn StoresService>,
        products: Arc<dyn ProductsService>,
        images: Arc<dyn ImagesService>,
    ) -> Self {
        Self {
            stores,
            products,
            images,
        }
    }

    #[must_use]
    pub fn from_context(context: &AppContext) -> Self {
        Self::new(
            Arc::clone(&context.stores),
            Arc::clone(&context.products),
            Arc::clone(&context.images),
        )
    }

    /// Register the store of `owner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is invalid or the backend rejects it.
    pub async fn create_store(
        &self,
        owner: AccountUuid,
        draft: StoreDraft,
    ) -> Result<Store, AdminError> {
        let store = draft.into_new_store(owner)?;

        Ok(self.stores.create_store(store).await?)
    }

    /// Replace a store's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is invalid or the backend rejects it.
    pub async fn update_store(
        &self,
        store: StoreUuid,
        draft: StoreDraft,
    ) -> Result<Store, AdminError> {
        let update = draft.validate()?;

        Ok(self.stores.update_store(store, update).await?)
    }

    /// Add a product to a store.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is invalid or the backend rejects it.
    pub async fn create_product(
        &self,
        store: StoreUuid,
        draft: ProductDraft,
    ) -> Result<Product, AdminError> {
        let product = draft.into_new_product(store)?;

        Ok(self.products.create_product(product).await?)
    }

    /// Edit a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is invalid or the backend rejects it.
    pub async fn update_product(
        &self,
        product: ProductUuid,
        draft: ProductDraft,
    ) -> Result<Product, AdminError> {
        let update = draft.validate()?;

        Ok(self.products.update_product(product, update).await?)
    }

    /// Remove a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the backend rejects the delete.
    pub async fn delete_product(&self, product: ProductUuid) -> Result<(), AdminError> {
        Ok(self.products.delete_product(product).await?)
    }

    /// Replace a product's variants with the grid described by `draft`.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid has duplicates or the backend rejects it.
    pub async fn save_variants(
        &self,
        product: ProductUuid,
        draft: VariantDraft,
    ) -> Result<Vec<ProductVariant>, AdminError> {
        let variants = draft.into_variants()?;

        Ok(self.products.replace_variants(product, variants).await?)
    }

    /// Import every product of a bulk file into `store` in one request.
    ///
    /// Returns the number of products created.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be imported or the backend rejects it.
    pub async fn import_products(&self, store: StoreUuid, text: &str) -> Result<usize, AdminError> {
        let products = import::parse_bulk_import(text, store)?;

        if products.is_empty() {
            info!(store_id = %store, "import file had no complete rows");

            return Ok(0);
        }

        let created = self.products.create_products(products).await?;

        info!(store_id = %store, count = created.len(), "imported products");

        Ok(created.len())
    }

    /// Upload a product image for `store` and return its public URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the file name has no extension or the upload fails.
    pub async fn upload_product_image(
        &self,
        store: StoreUuid,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AdminError> {
        let path = image_path(store, file_name, Uuid::now_v7())?;

        Ok(self
            .images
            .upload(path, bytes, content_type.to_string())
            .await?)
    }
}

fn image_path(store: StoreUuid, file_name: &str, id: Uuid) -> Result<String, DraftError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .ok_or_else(|| DraftError::MissingExtension(file_name.to_string()))?;

    Ok(format!("{store}/{id}.{}", extension.to_lowercase()))
}
