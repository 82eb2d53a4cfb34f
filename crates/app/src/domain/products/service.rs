//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use achei::{
    products::{NewProduct, Product, ProductUuid, ProductVariant},
    stores::StoreUuid,
    variants::NewVariant,
};

use crate::{
    backend::{BackendClient, Query},
    domain::products::{
        data::{ProductUpdate, VariantRow},
        errors::ProductsServiceError,
    },
};

const PRODUCTS: &str = "products";
const VARIANTS: &str = "product_variants";

#[derive(Debug, Clone)]
pub struct HttpProductsService {
    backend: BackendClient,
}

impl HttpProductsService {
    #[must_use]
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl ProductsService for HttpProductsService {
    async fn list_store_products(
        &self,
        store: StoreUuid,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let query = Query::new()
            .select("*")
            .eq("store_id", store)
            .order_desc("created_at");

        Ok(self.backend.select(PRODUCTS, &query).await?)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let created: Vec<Product> = self.backend.insert(PRODUCTS, &product).await?;

        let created = created
            .into_iter()
            .next()
            .ok_or(ProductsServiceError::NotFound)?;

        info!(product_id = %created.id, store_id = %created.store_id, "created product");

        Ok(created)
    }

    async fn create_products(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let created: Vec<Product> = self.backend.insert(PRODUCTS, &products).await?;

        info!(count = created.len(), "created products");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let query = Query::new().eq("id", product);

        let updated: Vec<Product> = self.backend.update(PRODUCTS, &query, &update).await?;

        let updated = updated
            .into_iter()
            .next()
            .ok_or(ProductsServiceError::NotFound)?;

        info!(product_id = %updated.id, "updated product");

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let query = Query::new().eq("id", product);

        if self.backend.delete(PRODUCTS, &query).await? == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        info!(product_id = %product, "deleted product");

        Ok(())
    }

    async fn list_variants(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<ProductVariant>, ProductsServiceError> {
        let query = Query::new().select("*").eq("product_id", product);

        Ok(self.backend.select(VARIANTS, &query).await?)
    }

    async fn replace_variants(
        &self,
        product: ProductUuid,
        variants: Vec<NewVariant>,
    ) -> Result<Vec<ProductVariant>, ProductsServiceError> {
        let removed = self
            .backend
            .delete(VARIANTS, &Query::new().eq("product_id", product))
            .await?;

        if variants.is_empty() {
            info!(product_id = %product, removed, "cleared variants");

            return Ok(Vec::new());
        }

        let rows: Vec<VariantRow> = variants
            .into_iter()
            .map(|variant| VariantRow {
                product_id: product,
                variant,
            })
            .collect();

        let created: Vec<ProductVariant> = self.backend.insert(VARIANTS, &rows).await?;

        info!(product_id = %product, removed, created = created.len(), "replaced variants");

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// List a store's products, newest first.
    async fn list_store_products(
        &self,
        store: StoreUuid,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Creates many products in one request.
    async fn create_products(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Updates a product.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Deletes a product.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;

    /// List a product's variants.
    async fn list_variants(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<ProductVariant>, ProductsServiceError>;

    /// Replace every variant of a product with a new set.
    async fn replace_variants(
        &self,
        product: ProductUuid,
        variants: Vec<NewVariant>,
    ) -> Result<Vec<ProductVariant>, ProductsServiceError>;
}
